use core::fmt;

/// A generation of (deadline, signal, watcher) inside a `TimerContext`.<br/>
/// `TimerContext` 内の (期限, シグナル, ウォッチャー) の世代を表す。
///
/// 期限切れ後の `reinit` で新しい世代が始まるたびに一つ進む。
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Epoch(u64);

impl Epoch {
  /// 最初の世代を返す。
  #[inline]
  pub const fn initial() -> Self {
    Self(0)
  }

  /// 次の世代を返す。
  #[inline]
  pub const fn next(self) -> Self {
    Self(self.0.wrapping_add(1))
  }

  #[inline]
  pub const fn as_u64(self) -> u64 {
    self.0
  }
}

impl fmt::Display for Epoch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
