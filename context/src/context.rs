use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::{ContextError, DoneSignal};

/// A value carried by a context.<br/>
/// コンテキストが保持する値。
pub type ContextValue = Arc<dyn Any + Send + Sync>;

/// The generic cancellation-context contract.<br/>
/// 汎用的なキャンセルコンテキストの契約。
///
/// 全てのメソッドはブロックしない。
pub trait Context: Send + Sync {
  /// Returns the instant after which the context is done, if any.<br/>
  /// コンテキストが完了する時刻を返します。期限を持たない場合は `None`。
  fn deadline(&self) -> Option<Instant>;

  /// Returns the signal of the current epoch.<br/>
  /// 現在のエポックのシグナルを返します。
  fn done(&self) -> DoneSignal;

  /// Returns the error of the current epoch, `None` while it is still pending.<br/>
  /// 現在のエポックのエラーを返します。未完了の間は `None`。
  fn err(&self) -> Option<ContextError>;

  /// Returns the value associated with `key`.<br/>
  /// `key` に関連付けられた値を返します。
  fn value(&self, key: &dyn Any) -> Option<ContextValue>;
}

/// A context whose deadline can be reinitialized in place.<br/>
/// 期限をその場で再設定できるコンテキスト。
pub trait ReinitContext: Context {
  /// Retargets the context to expire `duration` from now.<br/>
  /// 現在から `duration` 後に期限切れとなるよう再設定します。
  fn reinit(&self, duration: Duration);
}

/// Runs `future` until it completes or `ctx` is done.<br/>
/// `future` が完了するか `ctx` が完了するまで実行します。
///
/// 両方が同時に準備完了の場合は `future` の結果を優先する。
pub async fn with_context<C, F>(ctx: &C, future: F) -> Result<F::Output, ContextError>
where
  C: Context + ?Sized,
  F: Future, {
  let done = ctx.done();
  tokio::select! {
    biased;
    output = future => Ok(output),
    _ = done.wait() => Err(ctx.err().unwrap_or(ContextError::DeadlineExceeded)),
  }
}
