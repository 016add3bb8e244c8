//! `{Type}` annotation linking.
//!
//! API fragments annotate parameters and return values with braces, e.g.
//! `* \`path\` {string|Buffer|URL}`. [`resolve_type_links`] replaces each
//! annotation with whatever a [`TypeLinker`] produces for it. Annotations the
//! linker does not understand are left in place.
//!
//! Known limitation: the matcher stops at the first `}`, so nested braces are
//! not supported.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use nodedocs_shared::{NodeDocsError, Result};

static TYPE_SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("valid regex"));

/// Trailing `[]` markers (`string[]`, `Buffer[][]`).
static ARRAY_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\[\])+$").expect("valid regex"));

/// Converts one braced annotation (braces included) into replacement markup.
pub trait TypeLinker {
    /// Produce the replacement for `annotation`, or fail if it is not a known type.
    fn to_link(&self, annotation: &str) -> Result<String>;
}

impl<F> TypeLinker for F
where
    F: Fn(&str) -> Result<String>,
{
    fn to_link(&self, annotation: &str) -> Result<String> {
        self(annotation)
    }
}

/// Replace every `{...}` annotation in `text` with its link.
///
/// Matches are processed in order; each successful conversion replaces the
/// first remaining occurrence of that exact substring. Failures are absorbed.
pub fn resolve_type_links<L: TypeLinker + ?Sized>(text: &str, linker: &L) -> String {
    let annotations: Vec<&str> = TYPE_SIGNATURE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();

    if annotations.is_empty() {
        return text.to_string();
    }

    let mut result = text.to_string();
    let mut linked = 0usize;
    let mut unresolved = 0usize;

    for annotation in annotations {
        match linker.to_link(annotation) {
            Ok(link) => {
                result = result.replacen(annotation, &link, 1);
                linked += 1;
            }
            Err(e) => {
                trace!(error = %e, "leaving type annotation unlinked");
                unresolved += 1;
            }
        }
    }

    debug!(linked, unresolved, "type annotations processed");
    result
}

// ---------------------------------------------------------------------------
// Node.js type table
// ---------------------------------------------------------------------------

const JS_DOC_PREFIX: &str = "https://developer.mozilla.org/en-US/docs/Web/JavaScript/";

const JS_PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "Boolean"),
    ("integer", "Number"),
    ("null", "Null"),
    ("number", "Number"),
    ("string", "String"),
    ("symbol", "Symbol"),
    ("undefined", "Undefined"),
];

const JS_GLOBAL_TYPES: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "Map",
    "Object",
    "Promise",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "SyntaxError",
    "TypeError",
    "TypedArray",
    "URIError",
    "Uint8Array",
];

const NODE_TYPES: &[(&str, &str)] = &[
    ("Buffer", "buffer.html#buffer_class_buffer"),
    ("ChildProcess", "child_process.html#child_process_class_childprocess"),
    ("cluster.Worker", "cluster.html#cluster_class_worker"),
    ("crypto.constants", "crypto.html#crypto_crypto_constants_1"),
    ("dgram.Socket", "dgram.html#dgram_class_dgram_socket"),
    ("Domain", "domain.html#domain_class_domain"),
    ("EventEmitter", "events.html#events_class_eventemitter"),
    ("fs.Stats", "fs.html#fs_class_fs_stats"),
    ("Handle", "net.html#net_server_listen_handle_backlog_callback"),
    ("http.Agent", "http.html#http_class_http_agent"),
    ("http.ClientRequest", "http.html#http_class_http_clientrequest"),
    ("http.IncomingMessage", "http.html#http_class_http_incomingmessage"),
    ("http.Server", "http.html#http_class_http_server"),
    ("http.ServerResponse", "http.html#http_class_http_serverresponse"),
    ("Immediate", "timers.html#timers_class_immediate"),
    ("net.Server", "net.html#net_class_net_server"),
    ("net.Socket", "net.html#net_class_net_socket"),
    ("readline.Interface", "readline.html#readline_class_interface"),
    ("Stream", "stream.html#stream_stream"),
    ("stream.Duplex", "stream.html#stream_class_stream_duplex"),
    ("stream.Readable", "stream.html#stream_class_stream_readable"),
    ("stream.Writable", "stream.html#stream_class_stream_writable"),
    ("Timeout", "timers.html#timers_class_timeout"),
    ("tls.Server", "tls.html#tls_class_tls_server"),
    ("tls.TLSSocket", "tls.html#tls_class_tls_tlssocket"),
    ("URL", "url.html#url_the_whatwg_url_api"),
    ("URLSearchParams", "url.html#url_class_urlsearchparams"),
    ("vm.Script", "vm.html#vm_class_vm_script"),
    ("Worker", "worker_threads.html#worker_threads_class_worker"),
];

/// Links JavaScript primitives and globals to MDN and Node.js classes to
/// their API pages. Union annotations (`{string|Buffer}`) become one link per
/// member, joined by ` | `.
#[derive(Debug, Clone)]
pub struct NodeTypeLinker {
    custom: BTreeMap<String, String>,
}

impl NodeTypeLinker {
    /// Linker with the built-in table.
    pub fn new() -> Self {
        let data_structures = format!("{JS_DOC_PREFIX}Data_structures");
        let mut custom: BTreeMap<String, String> = NODE_TYPES
            .iter()
            .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
            .collect();

        custom.insert("any".into(), format!("{data_structures}#Data_types"));
        custom.insert("this".into(), format!("{JS_DOC_PREFIX}Reference/Operators/this"));
        custom.insert(
            "bigint".into(),
            format!("{JS_DOC_PREFIX}Reference/Global_Objects/BigInt"),
        );
        custom.insert(
            "Iterable".into(),
            format!("{JS_DOC_PREFIX}Reference/Iteration_protocols#The_iterable_protocol"),
        );
        custom.insert(
            "Iterator".into(),
            format!("{JS_DOC_PREFIX}Reference/Iteration_protocols#The_iterator_protocol"),
        );
        custom.insert(
            "AsyncIterator".into(),
            "https://tc39.github.io/ecma262/#sec-asynciterator-interface".into(),
        );

        Self { custom }
    }

    /// Add or override type links (`name -> url`).
    pub fn with_custom_types<I, K, V>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom
            .extend(types.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// URL for a bare type name (array suffix already removed).
    fn type_url(&self, name: &str) -> Option<String> {
        if let Some((_, primitive)) = JS_PRIMITIVES.iter().find(|(p, _)| *p == name) {
            return Some(format!("{JS_DOC_PREFIX}Data_structures#{primitive}_type"));
        }
        if JS_GLOBAL_TYPES.contains(&name) {
            return Some(format!("{JS_DOC_PREFIX}Reference/Global_Objects/{name}"));
        }
        self.custom.get(name).cloned()
    }
}

impl Default for NodeTypeLinker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLinker for NodeTypeLinker {
    fn to_link(&self, annotation: &str) -> Result<String> {
        let inner = annotation.replacen('{', "", 1).replacen('}', "", 1);

        let mut links = Vec::new();
        for member in inner.split('|').map(str::trim).filter(|m| !m.is_empty()) {
            let name = ARRAY_SUFFIX_RE.replace(member, "");
            let url = self
                .type_url(&name)
                .ok_or_else(|| NodeDocsError::link_resolution(annotation))?;
            links.push(format!(r#"<a href="{url}" class="type">&lt;{member}&gt;</a>"#));
        }

        if links.is_empty() {
            return Ok(inner);
        }
        Ok(links.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_only(annotation: &str) -> Result<String> {
        match annotation {
            "{string}" => Ok(r##"<a href="#string">string</a>"##.to_string()),
            other => Err(NodeDocsError::link_resolution(other)),
        }
    }

    fn always_fails(annotation: &str) -> Result<String> {
        Err(NodeDocsError::link_resolution(annotation))
    }

    #[test]
    fn rewrites_known_annotation() {
        let out = resolve_type_links("Returns {string} on success", &string_only);
        assert_eq!(out, r##"Returns <a href="#string">string</a> on success"##);
    }

    #[test]
    fn failing_converter_leaves_text_unchanged() {
        let text = "* `a` {Foo}\n* `b` {Bar|Baz}\nconst o = { x: 1 };";
        assert_eq!(resolve_type_links(text, &always_fails), text);
    }

    #[test]
    fn text_without_annotations_is_untouched() {
        let text = "Nothing to see here.";
        assert_eq!(resolve_type_links(text, &string_only), text);
    }

    #[test]
    fn mixed_success_and_failure() {
        let out = resolve_type_links("{string} and {Frob}", &string_only);
        assert_eq!(out, r##"<a href="#string">string</a> and {Frob}"##);
    }

    #[test]
    fn duplicate_annotations_are_each_replaced() {
        let out = resolve_type_links("{string}, {string}", &string_only);
        assert_eq!(
            out,
            r##"<a href="#string">string</a>, <a href="#string">string</a>"##
        );
    }

    #[test]
    fn nested_braces_stop_at_first_closing_brace() {
        let seen = std::cell::RefCell::new(Vec::new());
        let recorder = |annotation: &str| -> Result<String> {
            seen.borrow_mut().push(annotation.to_string());
            Err(NodeDocsError::link_resolution(annotation))
        };
        let text = "{Object {inner} tail}";
        assert_eq!(resolve_type_links(text, &recorder), text);
        assert_eq!(*seen.borrow(), vec!["{Object {inner}".to_string()]);
    }

    #[test]
    fn node_linker_primitives_and_globals() {
        let linker = NodeTypeLinker::new();
        assert_eq!(
            linker.to_link("{string}").unwrap(),
            r#"<a href="https://developer.mozilla.org/en-US/docs/Web/JavaScript/Data_structures#String_type" class="type">&lt;string&gt;</a>"#
        );
        assert_eq!(
            linker.to_link("{Promise}").unwrap(),
            r#"<a href="https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Promise" class="type">&lt;Promise&gt;</a>"#
        );
    }

    #[test]
    fn node_linker_unions_and_arrays() {
        let linker = NodeTypeLinker::new();
        let out = linker.to_link("{string[]|Buffer}").unwrap();
        assert!(out.contains("&lt;string[]&gt;"));
        assert!(out.contains(r#"href="buffer.html#buffer_class_buffer""#));
        assert_eq!(out.matches(" | ").count(), 1);
    }

    #[test]
    fn node_linker_rejects_unknown_member() {
        let linker = NodeTypeLinker::new();
        let err = linker.to_link("{string|Frobnicator}").unwrap_err();
        assert!(matches!(err, NodeDocsError::LinkResolution { .. }));
    }

    #[test]
    fn node_linker_custom_types_extend_table() {
        let linker = NodeTypeLinker::new()
            .with_custom_types([("Frobnicator", "frob.html#frob_class_frobnicator")]);
        let out = linker.to_link("{Frobnicator}").unwrap();
        assert!(out.contains(r#"href="frob.html#frob_class_frobnicator""#));
    }

    #[test]
    fn node_linker_in_document() {
        let text = "* `path` {string|URL}\n* `data` {Frobnicator}\n";
        let out = resolve_type_links(text, &NodeTypeLinker::new());
        assert!(out.contains("&lt;URL&gt;"));
        assert!(out.contains("{Frobnicator}"));
        assert!(!out.contains("{string|URL}"));
    }
}
