#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the red light violations dashboard server.

#[actix_web::main]
async fn main() -> Result<(), red_light_server::ServerError> {
    red_light_server::run_server().await
}
