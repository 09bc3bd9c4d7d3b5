use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match campus_server::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("campus_server: {err}");
            ExitCode::FAILURE
        }
    }
}
