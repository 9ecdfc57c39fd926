//! End-to-end resolution scenarios

use i18n_resolver::{
    DirectoryLoader, Locale, LocaleSettings, MemoryLoader, MessageBundle, MessageResolver,
    MissingKeyLog, ResolutionContext, ResourceScope, DEFAULT_BUNDLE_NAME, ERROR_FORMAT_MASK_KEY,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn write_bundle(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn context(default: Locale) -> ResolutionContext {
    ResolutionContext::new(Arc::new(LocaleSettings::new(default)))
}

/// Records every total-miss diagnostic for assertion.
#[derive(Default)]
struct CountingLog {
    messages: Mutex<Vec<String>>,
}

impl CountingLog {
    fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl MissingKeyLog for CountingLog {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[test]
fn language_only_bundle_beats_root() {
    // default locale fr_FR, package ships only a language-only fr bundle;
    // the fr value must win over root and never degrade to a sentinel
    let dir = TempDir::new().unwrap();
    write_bundle(
        dir.path(),
        "app/messages_fr.properties",
        "someKey=Une certaine valeur {0}\n",
    );
    write_bundle(dir.path(), "app/messages.properties", "otherKey=other\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));
    let ctx = context(Locale::with_region("fr", "FR"));

    let text = resolver.calculate_string(
        &ctx,
        &["app"],
        "someKey",
        &["foo"],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "Une certaine valeur foo");
}

#[test]
fn region_qualified_locale_falls_back_within_language() {
    let dir = TempDir::new().unwrap();
    write_bundle(
        dir.path(),
        "app/messages_ja.properties",
        "someKey=何らかの値 {0}\n",
    );
    write_bundle(dir.path(), "app/messages.properties", "someKey=Some Value {0}\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));

    // ja_JP falls back on the ja bundle
    let ctx = context(Locale::with_region("ja", "JP"));
    let text = resolver.calculate_string(
        &ctx,
        &["app"],
        "someKey",
        &["foo"],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "何らかの値 foo");
}

#[test]
fn unknown_language_falls_back_to_root() {
    let dir = TempDir::new().unwrap();
    write_bundle(
        dir.path(),
        "app/messages_fr.properties",
        "someKey=Une certaine valeur {0}\n",
    );
    write_bundle(dir.path(), "app/messages.properties", "someKey=Some Value {0}\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));

    // no de bundle and no en_US bundle: the root bundle is the best match
    let ctx = context(Locale::with_region("de", "DE"));
    let text = resolver.calculate_string(
        &ctx,
        &["app"],
        "someKey",
        &["foo"],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "Some Value foo");
}

#[test]
fn ambient_override_beats_process_default() {
    let dir = TempDir::new().unwrap();
    write_bundle(
        dir.path(),
        "app/messages_fr.properties",
        "someKey=Une certaine valeur {0}\n",
    );
    write_bundle(dir.path(), "app/messages.properties", "someKey=Some Value {0}\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));
    let ctx = context(Locale::with_region("de", "DE"));
    ctx.set_ambient_locale(Locale::with_region("fr", "FR"));

    let text = resolver.calculate_string(
        &ctx,
        &["app"],
        "someKey",
        &["foo"],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "Une certaine valeur foo");
}

#[test]
fn later_package_overwrites_shared_locale_slot() {
    let mut loader = MemoryLoader::new();
    loader.insert(
        "a.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "from A")]),
    );
    loader.insert(
        "b.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "from B")]),
    );
    let resolver = MessageResolver::new(Arc::new(loader));
    let ctx = context(Locale::new("fr"));

    let text = resolver.calculate_string(
        &ctx,
        &["a", "b"],
        "someKey",
        &[],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "from B");
}

#[test]
fn earlier_package_survives_when_later_has_no_entry() {
    let mut loader = MemoryLoader::new();
    loader.insert(
        "a.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "from A")]),
    );
    loader.insert(
        "b.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("unrelated", "x")]),
    );
    let resolver = MessageResolver::new(Arc::new(loader));
    let ctx = context(Locale::new("fr"));

    let text = resolver.calculate_string(
        &ctx,
        &["a", "b"],
        "someKey",
        &[],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "from A");
}

#[test]
fn chain_order_beats_package_order() {
    // package B only has an en_US translation; package A's fr one wins
    // because locale preference is decided after all packages are merged
    let mut loader = MemoryLoader::new();
    loader.insert(
        "a.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "valeur de A")]),
    );
    loader.insert(
        "b.messages",
        Locale::with_region("en", "US"),
        MessageBundle::from_iter([("someKey", "value from B")]),
    );
    let resolver = MessageResolver::new(Arc::new(loader));
    let ctx = context(Locale::new("fr"));

    let text = resolver.calculate_string(
        &ctx,
        &["a", "b"],
        "someKey",
        &[],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "valeur de A");
}

#[test]
fn total_miss_returns_sentinel_and_logs_once() {
    let log = Arc::new(CountingLog::default());
    let resolver = MessageResolver::new(Arc::new(MemoryLoader::new()))
        .with_missing_log(Arc::clone(&log) as Arc<dyn MissingKeyLog>);
    let ctx = context(Locale::new("fr"));

    let text = resolver.calculate_string(
        &ctx,
        &["a", "b"],
        "nowhere.key",
        &[],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
    );
    assert_eq!(text, "!nowhere.key!");
    assert_eq!(log.count(), 1);
    let messages = log.messages.lock().unwrap();
    assert!(messages[0].contains("nowhere.key"));
    assert!(messages[0].contains("\"a\""));
    assert!(messages[0].contains("\"b\""));
}

#[test]
fn total_miss_logging_can_be_suppressed() {
    let log = Arc::new(CountingLog::default());
    let resolver = MessageResolver::new(Arc::new(MemoryLoader::new()))
        .with_missing_log(Arc::clone(&log) as Arc<dyn MissingKeyLog>);
    let ctx = context(Locale::new("fr"));

    let text = resolver.calculate_string_with_logging(
        &ctx,
        &["a"],
        "nowhere.key",
        &[],
        &ResourceScope::default(),
        DEFAULT_BUNDLE_NAME,
        false,
    );
    assert_eq!(text, "!nowhere.key!");
    assert_eq!(log.count(), 0);
}

#[test]
fn repeated_resolution_loads_each_resource_once() {
    let mut memory = MemoryLoader::new();
    memory.insert(
        "app.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "valeur")]),
    );
    let loader = Arc::new(memory);
    let resolver = MessageResolver::new(Arc::clone(&loader) as Arc<dyn i18n_resolver::BundleLoader>);
    let ctx = context(Locale::new("fr"));

    for _ in 0..4 {
        let text = resolver.calculate_string(
            &ctx,
            &["app"],
            "someKey",
            &[],
            &ResourceScope::default(),
            DEFAULT_BUNDLE_NAME,
        );
        assert_eq!(text, "valeur");
    }
    // first call probes fr (hit), then en_US, en and root for the
    // fail-over chain members; nothing is re-probed afterwards
    assert_eq!(loader.load_count(), 4);
}

#[test]
fn scopes_do_not_share_cached_bundles() {
    let mut memory = MemoryLoader::new();
    memory.insert(
        "app.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "valeur")]),
    );
    let loader = Arc::new(memory);
    let resolver = MessageResolver::new(Arc::clone(&loader) as Arc<dyn i18n_resolver::BundleLoader>);
    let ctx = context(Locale::new("fr"));

    for scope in ["plugin-a", "plugin-b"] {
        let text = resolver.calculate_string(
            &ctx,
            &["app"],
            "someKey",
            &[],
            &ResourceScope::new(scope),
            DEFAULT_BUNDLE_NAME,
        );
        assert_eq!(text, "valeur");
    }
    // four probes per scope, nothing shared between them
    assert_eq!(loader.load_count(), 8);
}

#[test]
fn get_bundle_reaches_root_only_explicitly() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path(), "app/messages.properties", "someKey=root value\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));
    let ctx = context(Locale::with_region("fr", "FR"));

    // fr_FR and en_US yield nothing; root, the chain's explicit last
    // member, provides the bundle
    let bundle = resolver
        .get_bundle(&ctx, "app.messages", &ResourceScope::default())
        .expect("root bundle");
    assert_eq!(bundle.get("someKey"), Some("root value"));
}

#[test]
fn get_bundle_prefers_the_preferred_locale() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path(), "app/messages_fr.properties", "someKey=valeur\n");
    write_bundle(dir.path(), "app/messages.properties", "someKey=root value\n");

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));
    let ctx = context(Locale::with_region("fr", "FR"));

    let bundle = resolver
        .get_bundle(&ctx, "app.messages", &ResourceScope::default())
        .expect("fr bundle");
    assert_eq!(bundle.get("someKey"), Some("valeur"));
}

#[test]
fn error_strings_wrap_the_code_prefix_and_message() {
    let dir = TempDir::new().unwrap();
    write_bundle(
        dir.path(),
        "i18n/messages.properties",
        &format!("{ERROR_FORMAT_MASK_KEY}={{0}} - {{1}}\n"),
    );
    write_bundle(
        dir.path(),
        "app/messages.properties",
        "Step.ERROR_0001.Label=Something failed: {0}\n",
    );

    let resolver = MessageResolver::new(Arc::new(DirectoryLoader::new(dir.path())));
    let ctx = context(Locale::failover());

    let bundle = resolver
        .get_bundle(&ctx, "app.messages", &ResourceScope::default())
        .expect("app bundle");
    let text = resolver.get_error_string(&ctx, &bundle, "Step.ERROR_0001.Label", &["disk"]);
    assert_eq!(text, "Step.ERROR_0001 - Something failed: disk");
}

#[test]
fn shared_cache_across_resolvers() {
    let mut memory = MemoryLoader::new();
    memory.insert(
        "app.messages",
        Locale::new("fr"),
        MessageBundle::from_iter([("someKey", "valeur")]),
    );
    let loader: Arc<MemoryLoader> = Arc::new(memory);

    let first = MessageResolver::new(Arc::clone(&loader) as Arc<dyn i18n_resolver::BundleLoader>);
    let cache = Arc::clone(first.cache());
    let second = MessageResolver::new(Arc::clone(&loader) as Arc<dyn i18n_resolver::BundleLoader>)
        .with_cache(cache);

    let ctx = context(Locale::new("fr"));
    for resolver in [&first, &second] {
        let text = resolver.calculate_string(
            &ctx,
            &["app"],
            "someKey",
            &[],
            &ResourceScope::default(),
            DEFAULT_BUNDLE_NAME,
        );
        assert_eq!(text, "valeur");
    }
    // the second resolver shares the first one's cache and never loads
    assert_eq!(loader.load_count(), 4);
}
