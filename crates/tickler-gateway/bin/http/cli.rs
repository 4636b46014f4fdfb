use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use tickler_telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TICKLER_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "TICKLER_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "TICKLER_MYSQL_DSN";
pub const MYSQL_MAX_CONNECTIONS_ENV: &str = "TICKLER_MYSQL_MAX_CONNECTIONS";
pub const LOG_FORMAT_ENV: &str = "TICKLER_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "TICKLER_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MYSQL_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tickler-gateway", about = "HTTP/JSON to-do item service")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(
        long,
        env = MYSQL_MAX_CONNECTIONS_ENV,
        default_value_t = DEFAULT_MYSQL_MAX_CONNECTIONS
    )]
    pub mysql_max_connections: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value = "text")]
    pub log_format: LogFormatArg,

    /// OTLP/gRPC collector endpoint; span export is off when unset.
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
