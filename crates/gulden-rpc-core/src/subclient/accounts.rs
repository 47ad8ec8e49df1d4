use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::Dispatcher;
use crate::error::CoreError;
use crate::rpc::STATUS_SUCCESS;
use crate::types::Account;

use super::{flag, list, text};

/// Wallet account management.
pub struct AccountsClient {
    dispatcher: Arc<Dispatcher>,
}

impl AccountsClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Rename an account. Returns the node's reply text.
    pub async fn change_account_name(&self, account: &str, name: &str) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("changeaccountname", vec![json!(account), json!(name)])
            .await?;
        Ok(text(result))
    }

    /// Create an HD account and return its UUID.
    pub async fn create_account(&self, name: &str) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("createaccount", vec![json!(name)])
            .await?;
        Ok(text(result))
    }

    pub async fn delete_account(&self, account: &str, force: bool) -> Result<bool, CoreError> {
        let result = self
            .dispatcher
            .command("deleteaccount", vec![json!(account), json!(force)])
            .await?;
        Ok(flag(&result))
    }

    /// The account owning `address`.
    ///
    /// The node only reports UUID and label here, so `account_type` is empty
    /// and `hd_index` is `None`.
    pub async fn get_account(&self, address: &str) -> Result<Account, CoreError> {
        let result = self
            .dispatcher
            .command("getaccount", vec![json!(address)])
            .await?;

        let entries: &[Value] = match &result {
            Value::Array(entries) => entries.as_slice(),
            Value::Null => &[],
            other => {
                return Err(CoreError::InvalidResponse(format!(
                    "invalid getaccount result: {other}"
                )))
            }
        };
        let Some(first) = entries.first() else {
            return Err(CoreError::RemoteCommand {
                status: STATUS_SUCCESS,
                message: format!("No account found for address {address}"),
            });
        };

        let pair = &first[0];
        let (Some(uuid), Some(label)) = (pair[0].as_str(), pair[1].as_str()) else {
            return Err(CoreError::InvalidResponse(format!(
                "invalid getaccount result: {result}"
            )));
        };

        Ok(Account {
            uuid: uuid.to_owned(),
            label: label.to_owned(),
            account_type: String::new(),
            hd_index: None,
        })
    }

    /// UUID of the wallet's active account.
    pub async fn get_active_account(&self) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getactiveaccount", Vec::new())
            .await?;
        Ok(text(result))
    }

    pub async fn get_addresses_by_account(&self, account: &str) -> Result<Vec<String>, CoreError> {
        let result = self
            .dispatcher
            .command("getaddressesbyaccount", vec![json!(account)])
            .await?;
        list("getaddressesbyaccount", result)
    }

    /// Encoded public key that can be imported elsewhere as a watch-only account.
    pub async fn get_read_only_account(&self, account: &str) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getreadonlyaccount", vec![json!(account)])
            .await?;
        Ok(text(result))
    }

    pub async fn import_read_only_account(
        &self,
        name: &str,
        encoded_key: &str,
    ) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("importreadonlyaccount", vec![json!(name), json!(encoded_key)])
            .await?;
        Ok(text(result))
    }

    /// All accounts, optionally only those derived from `seed`.
    pub async fn list_accounts(&self, seed: Option<&str>) -> Result<Vec<Account>, CoreError> {
        let result = self
            .dispatcher
            .command("listaccounts", vec![json!(seed)])
            .await?;
        list("listaccounts", result)
    }

    /// Make `account` active. True when the node confirms the same account.
    pub async fn set_active_account(&self, account: &str) -> Result<bool, CoreError> {
        let result = self
            .dispatcher
            .command("setactiveaccount", vec![json!(account)])
            .await?;
        Ok(text(result).eq_ignore_ascii_case(account))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::CoreError;
    use crate::rpc::mock::MockTransport;
    use crate::test_util::{account_json, mock_client, VALID_ADDRESS};

    #[tokio::test]
    async fn create_account_returns_uuid() {
        let (client, mock) = mock_client(MockTransport::builder().result(json!("uuid-1")));
        let uuid = client
            .accounts()
            .create_account("savings")
            .await
            .expect("must succeed");
        assert_eq!(uuid, "uuid-1");

        let body = mock.last_body();
        assert_eq!(body["method"], "createaccount");
        assert_eq!(body["params"], json!(["savings"]));
    }

    #[tokio::test]
    async fn delete_account_sends_force_flag() {
        let (client, mock) = mock_client(MockTransport::builder().result(json!(true)));
        assert!(client
            .accounts()
            .delete_account("uuid-1", true)
            .await
            .expect("must succeed"));
        assert_eq!(mock.last_body()["params"], json!(["uuid-1", true]));
    }

    #[tokio::test]
    async fn get_account_unwraps_nested_pair() {
        let (client, _mock) = mock_client(
            MockTransport::builder().result(json!([[["uuid-1", "savings"]]])),
        );
        let account = client
            .accounts()
            .get_account(VALID_ADDRESS)
            .await
            .expect("must succeed");
        assert_eq!(account.uuid, "uuid-1");
        assert_eq!(account.label, "savings");
        assert_eq!(account.account_type, "");
        assert_eq!(account.hd_index, None);
    }

    #[tokio::test]
    async fn get_account_without_match_is_node_error() {
        let (client, _mock) = mock_client(MockTransport::builder().result(json!([])));
        let err = client
            .accounts()
            .get_account(VALID_ADDRESS)
            .await
            .expect_err("must fail");
        assert!(
            matches!(err, CoreError::RemoteCommand { ref message, .. } if message.contains(VALID_ADDRESS))
        );
    }

    #[tokio::test]
    async fn list_accounts_omits_absent_seed() {
        let (client, mock) = mock_client(
            MockTransport::builder().result(json!([account_json("a"), account_json("b")])),
        );
        let accounts = client
            .accounts()
            .list_accounts(None)
            .await
            .expect("must succeed");
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].label, "b");
        assert_eq!(accounts[1].account_type, "HD");
        assert_eq!(mock.last_body()["params"], json!([]));
    }

    #[tokio::test]
    async fn list_accounts_passes_seed() {
        let (client, mock) = mock_client(MockTransport::builder().result(json!([])));
        let accounts = client
            .accounts()
            .list_accounts(Some("seed-1"))
            .await
            .expect("must succeed");
        assert!(accounts.is_empty());
        assert_eq!(mock.last_body()["params"], json!(["seed-1"]));
    }

    #[tokio::test]
    async fn set_active_account_compares_case_insensitively() {
        let (client, _mock) = mock_client(
            MockTransport::builder()
                .result(json!("ABC-def"))
                .result(json!("other")),
        );
        assert!(client
            .accounts()
            .set_active_account("abc-DEF")
            .await
            .expect("must succeed"));
        assert!(!client
            .accounts()
            .set_active_account("abc-DEF")
            .await
            .expect("must succeed"));
    }

    #[tokio::test]
    async fn node_errors_surface_as_remote_command_errors() {
        let (client, _mock) = mock_client(
            MockTransport::builder().node_error(500, -4, "Account name already in use"),
        );
        let err = client
            .accounts()
            .change_account_name("uuid-1", "taken")
            .await
            .expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "node command failed (HTTP 500): Account name already in use"
        );
    }

    #[tokio::test]
    async fn get_addresses_by_account_returns_list() {
        let (client, _mock) = mock_client(
            MockTransport::builder().result(json!([VALID_ADDRESS])),
        );
        let addresses = client
            .accounts()
            .get_addresses_by_account("uuid-1")
            .await
            .expect("must succeed");
        assert_eq!(addresses, vec![VALID_ADDRESS.to_owned()]);
    }
}
