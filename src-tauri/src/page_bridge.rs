use std::collections::BTreeMap;

use serde::Serialize;
use tauri::webview::Cookie;

use crate::page_actions::{
    PAGE_ACTION_LOG_OUT, PAGE_ACTION_NEW_MESSAGE, PAGE_ACTION_SET_DARK_MODE,
    PAGE_ACTION_SHOW_PREFERENCES, PAGE_ACTION_SHOW_SUBSCRIPTION,
};

const BRIDGE_SCRIPT_TEMPLATE: &str = include_str!("../assets/page_bridge.js");
const CONFIG_PLACEHOLDER: &str = "__DYBLI_CONFIG__";

const STYLESHEETS: [(&str, &str); 5] = [
    ("browser", include_str!("../assets/style/browser.css")),
    ("dark-mode", include_str!("../assets/style/dark-mode.css")),
    ("swissid", include_str!("../assets/style/swissid.css")),
    ("sorry", include_str!("../assets/style/sorry.css")),
    ("maintenance", include_str!("../assets/style/maintenance.css")),
];

const PORTAL_COOKIE_HOST: &str = "service.post.ch";
const PORTAL_COOKIE_NAME: &str = "epof-portal";
const DARK_MODE_STORAGE_KEY: &str = "dybli.darkMode";
const SIGN_IN_PROVIDER_HOST: &str = "login.swissid.ch";
const SORRY_PAGE_TITLE: &str = "sorry.post.ch";
const MAINTENANCE_PATH_SUFFIX: &str = "/Maintenance";

#[derive(Debug, Serialize)]
struct Stylesheet {
    name: &'static str,
    css: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionHook {
    selector: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_when: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct PortalCookie {
    host: &'static str,
    name: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageBridgeConfig {
    initial_dark_mode: bool,
    dark_mode_action: &'static str,
    dark_mode_storage_key: &'static str,
    actions: BTreeMap<&'static str, ActionHook>,
    stylesheets: Vec<Stylesheet>,
    portal_cookie: PortalCookie,
    sign_in_provider_host: &'static str,
    sorry_title: &'static str,
    maintenance_path_suffix: &'static str,
}

fn action_hooks() -> BTreeMap<&'static str, ActionHook> {
    BTreeMap::from([
        (
            PAGE_ACTION_SHOW_PREFERENCES,
            ActionHook {
                selector: "#btnSettingsArea",
                skip_when: Some("#btnSettingsArea.switchBarBtnSelected"),
            },
        ),
        (
            PAGE_ACTION_SHOW_SUBSCRIPTION,
            ActionHook {
                selector: "#btnAbo",
                skip_when: Some("#btnAbo.switchBarBtnSelected"),
            },
        ),
        (
            PAGE_ACTION_NEW_MESSAGE,
            ActionHook {
                selector: "#menu_newmessage",
                skip_when: None,
            },
        ),
        (
            PAGE_ACTION_LOG_OUT,
            ActionHook {
                selector: ".u_var_logout",
                skip_when: None,
            },
        ),
    ])
}

fn bridge_config(initial_dark_mode: bool) -> PageBridgeConfig {
    PageBridgeConfig {
        initial_dark_mode,
        dark_mode_action: PAGE_ACTION_SET_DARK_MODE,
        dark_mode_storage_key: DARK_MODE_STORAGE_KEY,
        actions: action_hooks(),
        stylesheets: STYLESHEETS
            .iter()
            .map(|&(name, css)| Stylesheet { name, css })
            .collect(),
        portal_cookie: PortalCookie {
            host: PORTAL_COOKIE_HOST,
            name: PORTAL_COOKIE_NAME,
            value: portal_cookie_value(),
        },
        sign_in_provider_host: SIGN_IN_PROVIDER_HOST,
        sorry_title: SORRY_PAGE_TITLE,
        maintenance_path_suffix: MAINTENANCE_PATH_SUFFIX,
    }
}

fn portal_cookie_value() -> String {
    serde_json::json!({ "nonresponsive": true }).to_string()
}

/// Cookie that makes the portal serve its desktop layout, set on the webview
/// before the first portal request.
pub(crate) fn portal_cookie() -> Cookie<'static> {
    let value: String =
        url::form_urlencoded::byte_serialize(portal_cookie_value().as_bytes()).collect();
    Cookie::build((PORTAL_COOKIE_NAME, value))
        .domain(PORTAL_COOKIE_HOST)
        .path("/")
        .secure(true)
        .build()
}

/// Builds the initialization script injected into every page of the main window.
pub(crate) fn build_page_bridge_script(initial_dark_mode: bool) -> Result<String, String> {
    let config = serde_json::to_string(&bridge_config(initial_dark_mode))
        .map_err(|error| format!("Failed to serialize page bridge config: {error}"))?;
    Ok(BRIDGE_SCRIPT_TEMPLATE.replacen(CONFIG_PLACEHOLDER, &config, 1))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn embedded_config(script: &str) -> Value {
        let start = script.find("var config = ").expect("config assignment") + "var config = ".len();
        let end = start + script[start..].find(";\n").expect("config terminator");
        serde_json::from_str(&script[start..end]).expect("config is valid JSON")
    }

    #[test]
    fn script_embeds_config_in_place_of_placeholder() {
        let script = build_page_bridge_script(true).expect("build script");
        assert!(!script.contains(CONFIG_PLACEHOLDER));

        let config = embedded_config(&script);
        assert_eq!(config["initialDarkMode"], true);
        assert_eq!(config["darkModeAction"], "set-dark-mode");
        assert_eq!(config["darkModeStorageKey"], "dybli.darkMode");
        assert_eq!(config["signInProviderHost"], "login.swissid.ch");
        assert_eq!(config["sorryTitle"], "sorry.post.ch");
        assert_eq!(config["maintenancePathSuffix"], "/Maintenance");
    }

    #[test]
    fn every_click_action_has_a_dom_hook() {
        let config = embedded_config(&build_page_bridge_script(false).expect("build script"));
        let actions = config["actions"].as_object().expect("actions object");

        assert_eq!(actions.len(), 4);
        assert_eq!(actions["new-message"]["selector"], "#menu_newmessage");
        assert_eq!(actions["log-out"]["selector"], ".u_var_logout");
        assert_eq!(
            actions["show-preferences"]["skipWhen"],
            "#btnSettingsArea.switchBarBtnSelected"
        );
        assert_eq!(actions["show-subscription"]["skipWhen"], "#btnAbo.switchBarBtnSelected");
        assert!(actions["new-message"].get("skipWhen").is_none());
    }

    #[test]
    fn portal_cookie_requests_desktop_layout() {
        let config = embedded_config(&build_page_bridge_script(false).expect("build script"));
        assert_eq!(config["portalCookie"]["host"], "service.post.ch");
        assert_eq!(config["portalCookie"]["name"], "epof-portal");
        assert_eq!(config["portalCookie"]["value"], r#"{"nonresponsive":true}"#);
    }

    #[test]
    fn native_portal_cookie_matches_the_page_side_cookie() {
        let cookie = portal_cookie();
        assert_eq!(cookie.name(), "epof-portal");
        assert_eq!(cookie.value(), "%7B%22nonresponsive%22%3Atrue%7D");
        assert_eq!(cookie.domain(), Some("service.post.ch"));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn pushed_dark_mode_survives_page_loads() {
        let script = build_page_bridge_script(false).expect("build script");
        assert!(script.contains("sessionStorage.getItem(config.darkModeStorageKey)"));
        assert!(script.contains("sessionStorage.setItem(config.darkModeStorageKey"));
    }

    #[test]
    fn all_stylesheets_are_bundled() {
        let config = embedded_config(&build_page_bridge_script(false).expect("build script"));
        let names: Vec<&str> = config["stylesheets"]
            .as_array()
            .expect("stylesheets array")
            .iter()
            .filter_map(|sheet| sheet["name"].as_str())
            .collect();
        assert_eq!(
            names,
            ["browser", "dark-mode", "swissid", "sorry", "maintenance"]
        );
    }
}
