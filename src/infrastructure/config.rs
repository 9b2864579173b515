// ゲストAPI設定
//
// 環境変数からデータベース接続情報を読み込み、
// 型安全に提供するインフラストラクチャ層コンポーネント。

/// データベースパス環境変数名
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// ゲストAPI設定
///
/// ハンドラー構築時に明示的に渡す設定構造体。プロセスグローバルな
/// 状態を直接参照せず、テストでは任意の値で構築できる。
///
/// 接続情報が未設定の場合もここではエラーにしない。未設定の扱いは
/// ハンドラー側の責務（構造化された500レスポンスを返す）。
#[derive(Debug, Clone)]
pub struct GuestApiConfig {
    /// SQLiteデータベースファイルのパス（DATABASE_URL環境変数、未設定はNone）
    database_url: Option<String>,
}

impl GuestApiConfig {
    /// 環境変数から設定を読み込み
    ///
    /// - DATABASE_URL: データベースファイルのパス（空白のみの値はNone扱い）
    pub fn from_env() -> Self {
        let database_url = std::env::var(DATABASE_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self { database_url }
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(database_url: Option<String>) -> Self {
        Self { database_url }
    }

    /// データベースパスへの参照を取得
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    // ========================================
    // 明示的な値での構築テスト
    // ========================================

    /// 明示的なパスで構築できることを確認
    #[test]
    fn test_config_new_with_value() {
        let config = GuestApiConfig::new(Some("/tmp/guests.db".to_string()));
        assert_eq!(config.database_url(), Some("/tmp/guests.db"));
    }

    /// 未設定で構築するとNoneになることを確認
    #[test]
    fn test_config_new_without_value() {
        let config = GuestApiConfig::new(None);
        assert!(config.database_url().is_none());
    }

    // ========================================
    // from_envのテスト
    // ========================================

    /// 環境変数が設定されている場合に値が読み込まれることを確認
    #[test]
    #[serial(guest_env)]
    fn test_from_env_reads_database_url() {
        unsafe { set_env(DATABASE_URL_ENV, "/var/lib/wedding/guests.db") };

        let config = GuestApiConfig::from_env();
        assert_eq!(config.database_url(), Some("/var/lib/wedding/guests.db"));

        unsafe { remove_env(DATABASE_URL_ENV) };
    }

    /// 環境変数が未設定の場合にNoneになることを確認
    #[test]
    #[serial(guest_env)]
    fn test_from_env_missing_database_url() {
        unsafe { remove_env(DATABASE_URL_ENV) };

        let config = GuestApiConfig::from_env();
        assert!(config.database_url().is_none());
    }

    /// 空白のみの値がNone扱いになることを確認
    #[test]
    #[serial(guest_env)]
    fn test_from_env_blank_database_url_is_none() {
        unsafe { set_env(DATABASE_URL_ENV, "   ") };

        let config = GuestApiConfig::from_env();
        assert!(config.database_url().is_none());

        unsafe { remove_env(DATABASE_URL_ENV) };
    }
}
