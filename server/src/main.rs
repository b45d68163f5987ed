#[tokio::main]
async fn main() {
    ecotrack::start_server().await;
}
