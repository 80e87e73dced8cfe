use std::time::Duration;

use nexus_timer_context_rs::{with_context, Config, ConfigOption, Context, ReinitContext, TimerContext};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

const IDLE_TIMEOUT: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("read_loop=info,nexus_timer_context_rs=debug")),
    )
    .init();

  let (mut client, mut server) = tokio::io::duplex(64);

  tokio::spawn(async move {
    for i in 0..5 {
      tokio::time::sleep(Duration::from_millis(100)).await;
      if client.write_all(format!("message {}\n", i).as_bytes()).await.is_err() {
        return;
      }
    }
    // 接続を保持したまま黙り込む
    tokio::time::sleep(Duration::from_secs(10)).await;
  });

  let ctx = TimerContext::with_config(IDLE_TIMEOUT, Config::from([ConfigOption::with_name("read-loop")]));
  let mut buf = [0u8; 64];
  loop {
    match with_context(&ctx, server.read(&mut buf)).await {
      Ok(Ok(0)) => {
        tracing::info!("connection closed");
        break;
      }
      Ok(Ok(n)) => {
        tracing::info!("read: {:?}", String::from_utf8_lossy(&buf[..n]).trim_end());
        ctx.reinit(IDLE_TIMEOUT);
      }
      Ok(Err(err)) => {
        tracing::error!("read failed: {}", err);
        break;
      }
      Err(err) => {
        tracing::info!("idle timeout: {}, deadline = {:?}", err, ctx.deadline());
        break;
      }
    }
  }
}
