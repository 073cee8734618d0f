#[tokio::main]
async fn main() -> std::process::ExitCode {
    docfinder_lib::run().await
}
