use std::net::Ipv4Addr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use blogql_lib::config::Config;
use blogql_lib::graphql_api::{self, ApiSchemaContext};
use blogql_lib::CliOptions;
use blogql_store::Store;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Parse options");
    let cli_options = CliOptions::parse();

    info!("Loading configuration file");
    let config = Config::read(&cli_options.config)?;

    info!("Initialize store and run migrations");
    let store = Store::new(&config.database_url).await?;
    info!("Store initialization successful");

    let api_schema = graphql_api::api_schema(ApiSchemaContext::new(store));

    let router = Router::new()
        .route("/", get(|| async { "blogql is up" }))
        .route(
            "/graphql",
            get(graphiql_route).post_service(GraphQL::new(api_schema)),
        );

    let port = config.graphql.port;
    info!(port, "Starting GraphQL API server");
    axum::serve(
        TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?,
        router,
    )
    .await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt::init();
}

async fn graphiql_route() -> impl IntoResponse {
    axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
