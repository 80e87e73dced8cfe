use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::timer_context::TimerContextInner;
use crate::{ContextError, Epoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
  Expired,
  Extended,
  Superseded,
}

/// 一つのエポックの期限を待ち、そのエポックを一度だけ期限切れにするタスク。
///
/// 状態を変更する前に、捕捉したエポックが現在のエポックかをロック下で確認する。
/// 古いエポックのウォッチャーは何もせずに終了する。状態への参照は期限切れまで保持する。
pub(crate) struct ExpirationWatcher {
  epoch: Epoch,
  state: Arc<TimerContextInner>,
  retarget: Arc<Notify>,
}

impl ExpirationWatcher {
  pub(crate) fn new(epoch: Epoch, state: Arc<TimerContextInner>, retarget: Arc<Notify>) -> Self {
    Self { epoch, state, retarget }
  }

  pub(crate) async fn run(self) {
    loop {
      let Some(deadline) = self.current_deadline() else {
        return;
      };
      tokio::select! {
        _ = tokio::time::sleep_until(deadline) => {}
        _ = self.retarget.notified() => {
          tracing::trace!("ExpirationWatcher::run: epoch = {}, retarget", self.epoch);
          continue;
        }
      }
      if self.try_expire() != Outcome::Extended {
        return;
      }
    }
  }

  fn current_deadline(&self) -> Option<Instant> {
    let state = self.state.state.read();
    (state.epoch == self.epoch && state.err.is_none()).then_some(state.deadline)
  }

  fn try_expire(&self) -> Outcome {
    let mut state = self.state.state.write();
    if state.epoch != self.epoch || state.err.is_some() {
      return Outcome::Superseded;
    }
    if Instant::now() < state.deadline {
      return Outcome::Extended;
    }
    state.err = Some(ContextError::DeadlineExceeded);
    state.done.close();
    drop(state);
    tracing::debug!(
      "ExpirationWatcher::try_expire: name = {}, epoch = {}, deadline exceeded",
      self.state.log_name(),
      self.epoch
    );
    Outcome::Expired
  }
}
