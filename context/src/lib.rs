//! Reinitializable deadline context.
//!
//! `TimerContext` は期限切れを通知するコンテキストで、同じインスタンスを
//! `reinit` で何度でも新しい期限に再設定できる。読み取りループのように、
//! 操作ごとに期限を延長するホットパスでの割り当てとタスク生成を避けるために使う。

mod config;
mod config_option;
mod context;
mod context_error;
mod done_signal;
mod epoch;
mod expiration_watcher;
mod timer_context;

pub use self::{
  config::*, config_option::*, context::*, context_error::*, done_signal::*, epoch::*, timer_context::*,
};
