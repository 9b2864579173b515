// ゲストRSVPのドメインモデル
//
// HTTP APIのリクエスト/レスポンスとストアの双方で使用する
// ゲストレコードの構造を定義する。

use serde::{Deserialize, Serialize};

/// ゲストレコード
///
/// 1件の出欠回答に対応する保存済みの行。`id`と`created_at`はストアが
/// 挿入時に割り当て、以後変更されない（レコードは追記専用）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// ストアが割り当てる一意なID（挿入順に単調増加）
    pub id: i64,
    /// ゲスト名（自由記述、空文字可）
    pub guest_name: String,
    /// 食事の希望ラベル配列（順序保持、空可）
    pub food_preferences: Vec<String>,
    /// アレルギー情報（自由記述、空文字可）
    pub allergy_text: String,
    /// 飲み物の希望ラベル配列（順序保持、空可）
    pub drink_preferences: Vec<String>,
    /// 挿入時にストアが割り当てるISO-8601タイムスタンプ（欠落時はnull）
    pub created_at: Option<String>,
}

/// ゲスト作成ペイロード
///
/// POSTボディのJSONオブジェクトに対応する。全フィールドは省略可能で、
/// 省略時は空文字/空配列として扱う。ラベルの内容は検証せず
/// そのまま保存する。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    /// ゲスト名（デフォルト: 空文字）
    #[serde(default)]
    pub guest_name: String,
    /// 食事の希望ラベル配列（デフォルト: 空）
    #[serde(default)]
    pub food_preferences: Vec<String>,
    /// アレルギー情報（デフォルト: 空文字）
    #[serde(default)]
    pub allergy_text: String,
    /// 飲み物の希望ラベル配列（デフォルト: 空）
    #[serde(default)]
    pub drink_preferences: Vec<String>,
}
