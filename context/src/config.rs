use tokio::runtime::Handle;

use crate::ConfigOption;

#[derive(Debug, Clone, Default)]
pub struct Config {
  /// ウォッチャーを起動するランタイム。`None` の場合は呼び出し元のランタイムを使う。
  pub runtime: Option<Handle>,
  /// ログに出力するコンテキスト名。
  pub name: Option<String>,
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }
}
