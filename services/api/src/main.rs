use meta_scorer_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("meta-scorer error: {err}");
        std::process::exit(1);
    }
}
