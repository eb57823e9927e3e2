//! Backend request and response types

use serde::{Deserialize, Deserializer, Serialize};

/// Current user as returned by the identity endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Login identifier
    pub user_id: String,

    /// Authorization tier code (`001` main admin, `002` sub admin)
    pub auth_code: String,

    /// Display name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Contact address
    #[serde(default)]
    pub user_email: Option<String>,

    /// Account enabled flag
    #[serde(default)]
    pub enable: Option<bool>,
}

impl Session {
    /// Build a session with only the fields the gate needs
    pub fn new(user_id: impl Into<String>, auth_code: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            auth_code: auth_code.into(),
            user_name: None,
            user_email: None,
            enable: None,
        }
    }

    /// Whether this session holds the given top-tier code
    pub fn is_top_tier(&self, top_tier_code: &str) -> bool {
        self.auth_code == top_tier_code
    }
}

/// Body of the authorization check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckRequest {
    pub user_id: String,
    pub menu_name: String,
}

/// Answer of the authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckResponse {
    pub has_access: bool,
}

/// Admin sidebar entry as returned by the accessible-menus endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMenu {
    pub menu_no: i64,
    pub menu_name: String,
    #[serde(default)]
    pub menu_url: Option<String>,
    #[serde(default)]
    pub menu_icon: Option<String>,
    #[serde(default)]
    pub menu_order: Option<i32>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_visible: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<AdminMenu>,
}

fn default_true() -> bool {
    true
}

/// Nullable flag columns: an absent value counts as set
fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Public header menu node; flags are `"Y"`/`"N"` strings on the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMenuNode {
    #[serde(default)]
    pub menu_id: Option<i64>,
    pub menu_name: String,
    #[serde(default)]
    pub menu_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
    #[serde(default)]
    pub is_new_window: Option<String>,
    #[serde(default)]
    pub children: Vec<HeaderMenuNode>,
}

/// Envelope of the header tree endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTreeResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<MenuTreeData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTreeData {
    #[serde(default)]
    pub menu_tree_json: Option<Vec<HeaderMenuNode>>,
}

/// CSRF token issued by the token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfToken {
    pub token: String,
    #[serde(default)]
    pub header_name: Option<String>,
    #[serde(default)]
    pub parameter_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_account_payload() {
        let json = r#"{
            "userId": "sub01",
            "userName": "서브 관리자",
            "authCode": "002",
            "userEmail": null,
            "userTel": "02-000-0000",
            "enable": true
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, "sub01");
        assert!(!session.is_top_tier("001"));
        assert_eq!(session.enable, Some(true));
    }

    #[test]
    fn test_access_check_request_uses_wire_names() {
        let body = serde_json::to_value(AccessCheckRequest {
            user_id: "sub01".into(),
            menu_name: "메뉴 관리".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "userId": "sub01", "menuName": "메뉴 관리" }));
    }

    #[test]
    fn test_admin_menu_defaults_to_active() {
        let menu: AdminMenu = serde_json::from_str(
            r#"{ "menuNo": 3, "menuName": "공지사항 관리", "menuUrl": "/admin/notice-management.html" }"#,
        )
        .unwrap();
        assert!(menu.is_active);
        assert!(menu.children.is_empty());
        assert_eq!(menu.menu_icon, None);
    }

    #[test]
    fn test_admin_menu_list_tolerates_null_flags() {
        let json = r#"[
            { "menuNo": 1, "menuName": "대시보드", "menuUrl": "/admin/dashboard.html", "isActive": true, "isVisible": true },
            { "menuNo": 2, "menuName": "메뉴 관리", "menuUrl": "/admin/menu-management.html", "isActive": null, "isVisible": null, "children": null }
        ]"#;
        let menus: Vec<AdminMenu> = serde_json::from_str(json).unwrap();
        assert_eq!(menus.len(), 2);
        assert!(menus[1].is_active);
        assert!(menus[1].is_visible);
        assert!(menus[1].children.is_empty());

        let hidden: AdminMenu =
            serde_json::from_str(r#"{ "menuNo": 3, "menuName": "x", "isVisible": false }"#).unwrap();
        assert!(hidden.is_active);
        assert!(!hidden.is_visible);
    }

    #[test]
    fn test_session_requires_auth_code() {
        let missing = serde_json::from_str::<Session>(r#"{ "userId": "sub01", "userName": "서브" }"#);
        assert!(missing.is_err());

        let null_code = serde_json::from_str::<Session>(r#"{ "userId": "sub01", "authCode": null }"#);
        assert!(null_code.is_err());

        let session: Session = serde_json::from_str(
            r#"{ "userId": "admin", "authCode": "001", "roles": ["ROLE_ADMIN"], "lastLogin": "2024-01-01" }"#,
        )
        .unwrap();
        assert!(session.is_top_tier("001"));
    }

    #[test]
    fn test_menu_tree_envelope() {
        let json = r#"{
            "status": "OK",
            "data": { "menuTreeJson": [
                { "menuId": 1, "menuName": "홍보센터", "isActive": "Y",
                  "children": [ { "menuId": 2, "menuName": "보도자료", "isActive": "N" } ] }
            ] }
        }"#;
        let response: MenuTreeResponse = serde_json::from_str(json).unwrap();
        let tree = response.data.unwrap().menu_tree_json.unwrap();
        assert_eq!(tree[0].children[0].is_active.as_deref(), Some("N"));
    }
}
