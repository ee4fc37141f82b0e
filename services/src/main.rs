use cohort_services::{
    config::Config,
    routes, telemetry,
    upstream::{HttpUpstream, MEMORY_UPSTREAM_URL, MemoryUpstream, Upstream},
};
use cohort_utils::version_info::{build_branch, build_commit, build_date, build_version};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let config: Config = Config::init()?;
    telemetry::init_tracing(&config)?;

    print_build_info();
    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        upstream = %config.upstream_url(),
        "Configuration loaded"
    );

    if config.is_local() && config.upstream_url() == MEMORY_UPSTREAM_URL {
        info!("Serving from an empty in-memory upstream");
        return serve(MemoryUpstream::new(), config).await;
    }

    let upstream = HttpUpstream::new(config.upstream_url());
    serve(upstream, config).await
}

async fn serve<U: Upstream>(upstream: U, config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    let route = routes(upstream, config).await;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

fn print_build_info() {
    info!("===========================================");
    info!("  Cohort Services {}", build_version());
    info!("===========================================");
    info!("Build Date:   {}", build_date());
    info!("Build Commit: {}", build_commit());
    info!("Build Branch: {}", build_branch());
    info!("===========================================");
}
