use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;


/// A one-shot signal that is closed exactly once and observed by any number of waiters.<br/>
/// 一度だけクローズされ、任意の数の待機者から観測される一回限りのシグナル。
///
/// クローズされたシグナルが再びオープンされることはない。新しいエポックには
/// 常に新しい `DoneSignal` が割り当てられる。等価性はインスタンスの同一性で判定する。
#[derive(Clone)]
pub struct DoneSignal {
  inner: Arc<Inner>,
}

struct Inner {
  closed: AtomicBool,
  notify: Notify,
}

impl DoneSignal {
  pub(crate) fn new() -> Self {
    Self {
      inner: Arc::new(Inner {
        closed: AtomicBool::new(false),
        notify: Notify::new(),
      }),
    }
  }

  /// Closes the signal and wakes every waiter.<br/>
  /// シグナルをクローズし、全ての待機者を起こす。
  ///
  /// # Return Value / 戻り値
  /// - `true` - If this call closed the signal. / この呼び出しでクローズした場合。
  /// - `false` - If the signal was already closed. / 既にクローズ済みだった場合。
  pub(crate) fn close(&self) -> bool {
    if self.inner.closed.swap(true, Ordering::AcqRel) {
      return false;
    }
    self.inner.notify.notify_waiters();
    true
  }

  /// Returns whether the signal has been closed.<br/>
  /// シグナルがクローズ済みかどうかを返します。
  pub fn is_closed(&self) -> bool {
    self.inner.closed.load(Ordering::Acquire)
  }

  /// Waits until the signal is closed.<br/>
  /// シグナルがクローズされるまで待機します。
  ///
  /// 既にクローズ済みなら即座に完了する。シグナルを消費しないため、何度でも待機できる。
  pub async fn wait(&self) {
    let notified = self.inner.notify.notified();
    tokio::pin!(notified);
    loop {
      // フラグを確認する前に待機者として登録し、その間のクローズを取りこぼさない
      notified.as_mut().enable();
      if self.is_closed() {
        return;
      }
      notified.as_mut().await;
      notified.set(self.inner.notify.notified());
    }
  }
}

impl Debug for DoneSignal {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DoneSignal").field("closed", &self.is_closed()).finish()
  }
}

impl PartialEq for DoneSignal {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Eq for DoneSignal {}
