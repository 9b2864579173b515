//! SQLiteゲストストア
//!
//! ゲストRSVPレコードの挿入・一覧機能を提供する。
//! 接続はリクエストごとに1本開き、操作のスコープを抜けると
//! 必ず解放される（エラー経路を含む）。プールや共有接続は持たない。

use rusqlite::Connection;
use thiserror::Error;

use crate::domain::{Guest, NewGuest};

/// ストアエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(String),

    /// シリアライズエラー
    #[error("シリアライズエラー: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// SQLiteデータベースのスキーマを定義するSQL
///
/// 接続オープン時に毎回実行する冪等なブートストラップ。
/// 配列フィールド（食事・飲み物の希望）はJSON文字列として格納する。
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS wedding_guests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,          -- ストアが割り当てる一意なID
    guest_name TEXT,                               -- ゲスト名（自由記述）
    food_preferences TEXT,                         -- JSON配列（食事の希望）
    allergy_text TEXT,                             -- アレルギー情報（自由記述）
    drink_preferences TEXT,                        -- JSON配列（飲み物の希望）
    created_at TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))  -- ISO-8601 UTC
);

CREATE INDEX IF NOT EXISTS idx_wedding_guests_created_at
    ON wedding_guests(created_at DESC);
"#;

/// SQLiteゲストストア
///
/// データベースファイルのパスのみを保持し、操作ごとに接続を開く。
/// rusqliteは同期APIのため、実際のデータベース処理は
/// ブロッキングスレッドプール上で実行する。
#[derive(Debug, Clone)]
pub struct GuestStore {
    /// データベースファイルのパス
    db_path: String,
}

impl GuestStore {
    /// 新しいGuestStoreを作成
    ///
    /// この時点では接続を開かない。接続は各操作のスコープ内で
    /// 開閉される。
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// 接続を開き、スキーマを初期化する（内部用）
    fn open(db_path: &str) -> Result<Connection, StoreError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(conn)
    }

    /// ゲストを1件挿入する
    ///
    /// 挿入と生成されたIDの読み戻しを単一トランザクションとして
    /// コミットする。`id`と`created_at`はストア側で割り当てる。
    ///
    /// # Returns
    /// * `Ok(i64)` - 新しく割り当てられたID
    /// * `Err(StoreError)` - エラー時
    pub async fn insert_guest(&self, new_guest: &NewGuest) -> Result<i64, StoreError> {
        let new_guest = new_guest.clone();
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = Self::open(&db_path)?;

            let food_json = serde_json::to_string(&new_guest.food_preferences)?;
            let drink_json = serde_json::to_string(&new_guest.drink_preferences)?;

            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO wedding_guests
                     (guest_name, food_preferences, allergy_text, drink_preferences)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    &new_guest.guest_name,
                    &food_json,
                    &new_guest.allergy_text,
                    &drink_json,
                ],
            )?;
            let guest_id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(guest_id)
        })
        .await
        .map_err(|e| StoreError::Database(format!("タスク実行エラー: {}", e)))?
    }

    /// 全ゲストを一覧する
    ///
    /// フィルタやページングなしの全件読み取り。作成日時の降順
    /// （同時刻はIDの降順）で返す。
    ///
    /// # Returns
    /// * `Ok(Vec<Guest>)` - ゲストのリスト（最新が先頭）
    /// * `Err(StoreError)` - エラー時
    pub async fn list_guests(&self) -> Result<Vec<Guest>, StoreError> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let conn = Self::open(&db_path)?;

            let mut stmt = conn.prepare(
                "SELECT id, guest_name, food_preferences, allergy_text,
                        drink_preferences, created_at
                 FROM wedding_guests
                 ORDER BY created_at DESC, id DESC",
            )?;

            // NULL許容カラムはいったん生の値として取り出し、
            // ドメイン型への変換は行イテレーションの外で行う
            let rows: Vec<RawGuestRow> = stmt
                .query_map([], |row| {
                    Ok(RawGuestRow {
                        id: row.get(0)?,
                        guest_name: row.get(1)?,
                        food_preferences: row.get(2)?,
                        allergy_text: row.get(3)?,
                        drink_preferences: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<Result<_, _>>()?;

            rows.into_iter().map(RawGuestRow::into_guest).collect()
        })
        .await
        .map_err(|e| StoreError::Database(format!("タスク実行エラー: {}", e)))?
    }
}

/// ドメイン型へ変換する前の生の行（内部用）
struct RawGuestRow {
    id: i64,
    guest_name: Option<String>,
    food_preferences: Option<String>,
    allergy_text: Option<String>,
    drink_preferences: Option<String>,
    created_at: Option<String>,
}

impl RawGuestRow {
    /// 生の行をGuestに変換する
    ///
    /// NULL/空の格納値はデフォルト（空文字・空配列）として扱う。
    fn into_guest(self) -> Result<Guest, StoreError> {
        Ok(Guest {
            id: self.id,
            guest_name: self.guest_name.unwrap_or_default(),
            food_preferences: decode_labels(self.food_preferences)?,
            allergy_text: self.allergy_text.unwrap_or_default(),
            drink_preferences: decode_labels(self.drink_preferences)?,
            created_at: self.created_at,
        })
    }
}

/// JSON文字列として格納されたラベル配列をデコードする
///
/// NULLまたは空文字は空配列として扱う。
fn decode_labels(raw: Option<String>) -> Result<Vec<String>, StoreError> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => Ok(serde_json::from_str(&s)?),
    }
}
