use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pathviz", about = "Replay maze generation and path finding from a remote service")]
pub struct Cli {
    /// Base URL of the maze / path-finding service.
    #[arg(long, env = "PATHVIZ_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(5..=200))]
    pub rows: u16,

    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(5..=200))]
    pub cols: u16,

    /// Delay between animation steps, in milliseconds.
    #[arg(long = "speed", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=100))]
    pub speed_ms: u64,

    #[arg(long, default_value_t = 25.0)]
    pub cell_size: f32,

    /// tracing filter directive, e.g. `pathviz_core=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub rows: usize,
    pub cols: usize,
    pub speed_ms: u64,
    pub cell_size: f32,
    pub log_filter: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url,
            rows: usize::from(cli.rows),
            cols: usize::from(cli.cols),
            speed_ms: cli.speed_ms,
            cell_size: cli.cell_size.clamp(4.0, 60.0),
            log_filter: cli.log_filter,
        }
    }
}
