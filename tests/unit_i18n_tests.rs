//! # I18n Unit Tests / 国际化单元测试

use vip_regress::infra::logging::level_for_verbosity;
use vip_regress::resolve_locale;

#[test]
fn test_resolve_locale() {
    assert_eq!(resolve_locale("zh-CN".to_string()), "zh-CN");
    assert_eq!(resolve_locale("en-US".to_string()), "en");
    assert_eq!(resolve_locale("zh_TW".to_string()), "zh-CN");
    assert_eq!(resolve_locale("fr-FR".to_string()), "en");
}

#[test]
fn test_verbosity_levels() {
    assert_eq!(level_for_verbosity(0), "warn");
    assert_eq!(level_for_verbosity(1), "info");
    assert_eq!(level_for_verbosity(2), "debug");
    assert_eq!(level_for_verbosity(9), "trace");
}
