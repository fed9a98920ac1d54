use clap::Parser;
use dotenv::dotenv;
use recipebox_core::domain::common::{DatabaseConfig, ObjectStorageConfig, RecipeboxConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "recipebox")]
pub struct Args {
    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

impl Args {
    /// Reads the configuration from `.env` and the process environment.
    /// Command-line arguments are ignored.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Ok(Args::try_parse_from([env!("CARGO_PKG_NAME")])?)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "recipebox")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "recipebox"
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "recipebox")]
    pub name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ObjectStorageArgs {
    #[arg(
        long = "object-storage-endpoint",
        env = "OBJECT_STORAGE_ENDPOINT",
        default_value = "http://localhost:9000"
    )]
    pub endpoint: String,

    #[arg(
        long = "object-storage-region",
        env = "OBJECT_STORAGE_REGION",
        default_value = "us-east-1"
    )]
    pub region: String,

    #[arg(
        long = "object-storage-access-key",
        env = "OBJECT_STORAGE_ACCESS_KEY",
        default_value = "minioadmin"
    )]
    pub access_key: String,

    #[arg(
        long = "object-storage-secret-key",
        env = "OBJECT_STORAGE_SECRET_KEY",
        default_value = "minioadmin"
    )]
    pub secret_key: String,

    #[arg(
        long = "object-storage-bucket",
        env = "OBJECT_STORAGE_BUCKET",
        default_value = "recipes"
    )]
    pub bucket: String,

    /// Base URL images are served from, e.g. a CDN in front of the bucket.
    #[arg(long = "object-storage-public-url", env = "OBJECT_STORAGE_PUBLIC_URL")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for RecipeboxConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.database.host,
                port: args.database.port,
                username: args.database.user,
                password: args.database.password,
                name: args.database.name,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                public_url: args.object_storage.public_url,
            },
        }
    }
}
