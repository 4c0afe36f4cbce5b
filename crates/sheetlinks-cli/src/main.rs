//! Thin entrypoint for the `sheetlinks` binary.

#[tokio::main]
async fn main() {
    let exit_code = sheetlinks_cli::run().await;
    std::process::exit(exit_code);
}
