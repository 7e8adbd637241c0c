use anyhow::Context;
use bridgeschool::modules::users::service::UserService;
use bridgeschool_auth::Role;
use bridgeschool_cli::seeder::{self, AcademicsPerBranch, SeedConfig, StaffPerBranch};
use bridgeschool_models::BranchId;
use bridgeschool_models::users::CreateUserDto;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use validator::Validate;

#[derive(Parser)]
#[command(name = "bridgeschool-cli")]
#[command(about = "Administrative tools for the Bridge School API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Teacher,
    Admin,
    SuperAdmin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Teacher => Role::Teacher,
            RoleArg::Admin => Role::Admin,
            RoleArg::SuperAdmin => Role::SuperAdmin,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a staff account (super admins are normally created this way)
    CreateUser {
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Prompted for securely when omitted
        #[arg(short = 'p', long)]
        password: Option<String>,

        #[arg(short = 'r', long, value_enum, default_value = "super-admin")]
        role: RoleArg,

        #[arg(short = 'b', long)]
        branch_id: Option<i32>,
    },
    /// Seed fake branches, staff, classes, courses and students
    Seed {
        #[arg(short = 'b', long, default_value = "2")]
        branches: usize,

        #[arg(long, default_value = "1")]
        admins: usize,

        #[arg(long, default_value = "4")]
        teachers: usize,

        #[arg(long, default_value = "4")]
        classes: usize,

        #[arg(long, default_value = "6")]
        courses: usize,

        /// Students enrolled in each class
        #[arg(long, default_value = "20")]
        students: usize,
    },
    /// Remove seeded branches and staff (and everything under them)
    ClearSeed,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = bridgeschool_db::init_db_pool_from_env()
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
            role,
            branch_id,
        } => {
            handle_create_user(
                &pool,
                first_name,
                last_name,
                email,
                password,
                role.into(),
                branch_id.map(BranchId),
            )
            .await
        }
        Commands::Seed {
            branches,
            admins,
            teachers,
            classes,
            courses,
            students,
        } => {
            let config = SeedConfig::new(branches)
                .with_staff(StaffPerBranch { admins, teachers })
                .with_academics(AcademicsPerBranch {
                    classes,
                    courses,
                    students_per_class: students,
                });
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
        Commands::Migrate => {
            bridgeschool_db::run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

async fn handle_create_user(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Role,
    branch_id: Option<BranchId>,
) -> anyhow::Result<()> {
    let first_name = prompt_or(first_name, "First name")?;
    let last_name = prompt_or(last_name, "Last name")?;
    let email = prompt_or(email, "Email address")?;
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let dto = CreateUserDto {
        email,
        password,
        first_name,
        last_name,
        role,
        branch_id,
    };
    dto.validate()?;

    let user = UserService::create_user(pool, dto)
        .await
        .map_err(|e| e.error)?;

    println!("\n✅ {} account created", user.role);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.full_name());
    Ok(())
}
