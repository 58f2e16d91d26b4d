use splitcheck::run_main;
use splitcheck::types::AppError;

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("error: {err}");
        let code = match err {
            AppError::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
