use anyhow::bail;
use clap::Parser;
use stockroom_tonic_core::types::DEFAULT_LOW_STOCK_THRESHOLD;

/// Runtime configuration for the `stockroom-tonic-server` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults suitable for a single-node deployment. Each field is
/// independently tunable at runtime.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stockroom-tonic-server",
    version,
    about = "A gRPC service for inventory records with low-stock alert streaming"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/stockroom.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Path of the JSON snapshot file.
    ///
    /// The full product set is rewritten here after every successful
    /// mutation and restored at startup. A missing or unreadable file is
    /// treated as an empty store.
    ///
    /// Environment variable: `SNAPSHOT_PATH`
    #[arg(long, env = "SNAPSHOT_PATH", default_value_t = String::from("products.json"))]
    pub snapshot_path: String,

    /// Quantity below which a successful stock update publishes a low-stock
    /// alert to all streaming subscribers.
    ///
    /// Environment variable: `LOW_STOCK_THRESHOLD`
    #[arg(long, env = "LOW_STOCK_THRESHOLD", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_stock_threshold: i64,

    /// Capacity of each subscriber's alert channel.
    ///
    /// A subscriber whose channel is full has further alerts dropped (for
    /// that subscriber only) until it catches up. Higher values absorb
    /// larger bursts at the cost of memory per subscriber.
    ///
    /// Environment variable: `ALERT_BUFFER_SIZE`
    #[arg(long, env = "ALERT_BUFFER_SIZE", default_value_t = 8)]
    pub alert_buffer_size: usize,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub snapshot_path: String,
    pub low_stock_threshold: i64,
    pub alert_buffer_size: usize,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.low_stock_threshold < 0 {
            bail!("LOW_STOCK_THRESHOLD must not be negative");
        }

        if args.alert_buffer_size == 0 {
            bail!("ALERT_BUFFER_SIZE must be greater than 0");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            snapshot_path: args.snapshot_path,
            low_stock_threshold: args.low_stock_threshold,
            alert_buffer_size: args.alert_buffer_size,
        })
    }
}
