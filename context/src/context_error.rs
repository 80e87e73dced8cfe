use thiserror::Error;

/// An error reported by a context once it is done.<br/>
/// コンテキストが完了した際に報告されるエラー。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextError {
  /// The deadline of the current epoch has passed.<br/>
  /// 現在のエポックの期限を過ぎた。
  #[error("context deadline exceeded")]
  DeadlineExceeded,
}
