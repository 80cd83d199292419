#![cfg(feature = "pcsc")]

//! 共通: 実機テスト用ヘルパー
//!
//! このファイルは `--features pcsc` でコンパイルされる実機テストに
//! 共通で使える関数を提供します。主な目的は PC/SC リーダーを安全に
//! 選択して、リーダーやサービスが無い環境（CI 等）では `Ok(None)` を返すことです。

use nfctag::device::{DeviceSession, DeviceSessionBuilder};
use nfctag::{Error, Result};

/// PC/SC コンテキストを確立し、対応リーダーを選択した `DeviceSession` を返す。
///
/// - Ok(Some(device)) : 対応リーダーが見つかった
/// - Ok(None) : リーダーまたは PC/SC サービスが無い（CI 等では許容）
/// - Err(e) : その他の致命的なエラー
pub fn open_reader() -> Result<Option<DeviceSession>> {
    let builder = match DeviceSessionBuilder::new().with_pcsc() {
        Ok(b) => b,
        Err(Error::Pcsc(pcsc::Error::NoService)) => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut device = builder.build()?;
    match device.find_device() {
        Ok(_) => Ok(Some(device)),
        Err(Error::DeviceNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
