use fast_statusline::run;

#[tokio::main]
async fn main() {
  // The host treats stdout as display text, so failures go to stderr and the
  // process exits 0 either way.
  if let Err(e) = run().await {
    eprintln!("fast-statusline: {}", e);
  }
}
