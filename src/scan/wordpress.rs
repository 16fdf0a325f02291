//! Extraction of WordPress-specific call patterns: hook registrations
//! and invocations, `$wpdb` call sites, AJAX handler registrations, and
//! REST route registrations.
//!
//! All matching is literal and case-sensitive on the first quoted string
//! argument. Hook names built from interpolation or concatenation are
//! invisible to these patterns; accepted limitation.

use lazy_static::lazy_static;
use regex::Regex;

use super::source::line_number;
use super::types::{DatabaseOpRecord, HookBuckets, HookRecord};

lazy_static! {
    static ref ADD_ACTION: Regex =
        Regex::new(r#"add_action\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
    static ref ADD_FILTER: Regex =
        Regex::new(r#"add_filter\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
    static ref DO_ACTION: Regex =
        Regex::new(r#"do_action\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
    static ref APPLY_FILTERS: Regex =
        Regex::new(r#"apply_filters\s*\(\s*['"]([^'"]+)['"]"#).unwrap();

    static ref WPDB_CALL: Regex = Regex::new(
        r"\$wpdb->(?P<method>get_results|get_var|get_row|query|prepare|insert|update|delete)\s*\("
    )
    .unwrap();

    static ref AJAX_HANDLER: Regex =
        Regex::new(r#"add_action\s*\(\s*['"]wp_ajax_(?:nopriv_)?([^'"]+)['"]"#).unwrap();

    static ref REST_ROUTE: Regex =
        Regex::new(r#"register_rest_route\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
}

/// Extract hook registrations and invocations, grouped by call shape.
pub fn extract_hooks(content: &str, file: &str) -> HookBuckets {
    HookBuckets {
        actions: collect_hooks(&ADD_ACTION, content, file),
        filters: collect_hooks(&ADD_FILTER, content, file),
        do_actions: collect_hooks(&DO_ACTION, content, file),
        apply_filters: collect_hooks(&APPLY_FILTERS, content, file),
    }
}

fn collect_hooks(pattern: &Regex, content: &str, file: &str) -> Vec<HookRecord> {
    pattern
        .captures_iter(content)
        .map(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            HookRecord {
                name: caps[1].to_string(),
                file: file.to_string(),
                line: line_number(content, start),
            }
        })
        .collect()
}

/// Extract call sites on the global `$wpdb` handle.
pub fn extract_database_ops(content: &str, file: &str) -> Vec<DatabaseOpRecord> {
    WPDB_CALL
        .captures_iter(content)
        .map(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            DatabaseOpRecord {
                method: caps["method"].to_string(),
                file: file.to_string(),
                line: line_number(content, start),
            }
        })
        .collect()
}

/// Extract AJAX handler identifiers.
///
/// An AJAX handler is an `add_action` whose hook literal starts with
/// `wp_ajax_`, optionally followed by the `nopriv_` variant prefix. The
/// remainder of the literal is the handler name; the privileged and
/// no-privilege registrations of one handler both yield the same name,
/// and duplicates are preserved.
pub fn extract_ajax_handlers(content: &str) -> Vec<String> {
    AJAX_HANDLER
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Extract REST route paths from `register_rest_route` calls.
pub fn extract_rest_routes(content: &str) -> Vec<String> {
    REST_ROUTE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_action_hook() {
        let content = "<?php\nadd_action('init', 'my_plugin_init');\n";
        let buckets = extract_hooks(content, "plugin.php");

        assert_eq!(buckets.actions.len(), 1);
        assert_eq!(buckets.actions[0].name, "init");
        assert_eq!(buckets.actions[0].file, "plugin.php");
        assert_eq!(buckets.actions[0].line, 2);
        assert!(buckets.filters.is_empty());
    }

    #[test]
    fn test_hook_buckets_by_call_shape() {
        let content = r#"
add_action( 'admin_menu', 'cb' );
add_filter("the_content", 'cb');
do_action('my_plugin_loaded');
apply_filters('my_plugin_value', $value);
"#;
        let buckets = extract_hooks(content, "hooks.php");
        assert_eq!(buckets.actions.len(), 1);
        assert_eq!(buckets.filters.len(), 1);
        assert_eq!(buckets.do_actions.len(), 1);
        assert_eq!(buckets.apply_filters.len(), 1);
        assert_eq!(buckets.total(), 4);
        assert_eq!(buckets.filters[0].name, "the_content");
    }

    #[test]
    fn test_concatenated_hook_name_is_invisible() {
        let content = "add_action($prefix . '_init', 'cb');\n";
        let buckets = extract_hooks(content, "a.php");
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn test_extract_database_ops() {
        let content = r#"
$rows = $wpdb->get_results("SELECT * FROM {$wpdb->posts}");
$wpdb->insert($table, $data);
$sql = $wpdb->prepare("SELECT %d", $id);
"#;
        let ops = extract_database_ops(content, "db.php");
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].method, "get_results");
        assert_eq!(ops[0].line, 2);
        assert_eq!(ops[1].method, "insert");
        assert_eq!(ops[2].method, "prepare");
    }

    #[test]
    fn test_unknown_wpdb_method_ignored() {
        let content = "$wpdb->esc_like($term);\n";
        assert!(extract_database_ops(content, "a.php").is_empty());
    }

    #[test]
    fn test_ajax_handlers_strip_prefixes() {
        let content = r#"
add_action('wp_ajax_save_data', 'handle_save');
add_action('wp_ajax_nopriv_save_data', 'handle_save');
"#;
        let handlers = extract_ajax_handlers(content);
        assert_eq!(handlers, vec!["save_data", "save_data"]);
    }

    #[test]
    fn test_ajax_registration_also_counts_as_action_hook() {
        // The same call site satisfies both the hook family and the
        // AJAX family; no deduplication across families.
        let content = "add_action('wp_ajax_do_thing', 'cb');\n";
        let buckets = extract_hooks(content, "a.php");
        assert_eq!(buckets.actions.len(), 1);
        assert_eq!(buckets.actions[0].name, "wp_ajax_do_thing");
        assert_eq!(extract_ajax_handlers(content), vec!["do_thing"]);
    }

    #[test]
    fn test_extract_rest_routes() {
        let content = r#"
register_rest_route('myplugin/v1', '/items', array());
register_rest_route( "myplugin/v1", '/items/(?P<id>\d+)', array() );
"#;
        let routes = extract_rest_routes(content);
        assert_eq!(routes, vec!["myplugin/v1", "myplugin/v1"]);
    }
}
