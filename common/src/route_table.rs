//! Declarative route table and path resolution for the chatbot views.
//!
//! The table is built once at start-up and never mutated. Resolution is a pure
//! function of `(table, path)`.

use std::collections::{BTreeMap, BTreeSet};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical name of the root layout entry.
pub const ROOT_ROUTE: &str = "ChatbotLayout";
/// Logical name of the chat view entry.
pub const CHAT_ROUTE: &str = "Chat";
/// Path parameter carrying the conversation identifier.
pub const CHAT_ID_PARAM: &str = "chatId";

/// Redirect chains longer than this are treated as unresolvable.
const MAX_REDIRECTS: usize = 8;

/// Characters escaped when a parameter value is rendered into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub type RouteParams = BTreeMap<String, String>;

/// Views a route entry can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    ChatbotLayout,
    Chatbot,
}

/// Declarative rule mapping a path pattern to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub view: ViewId,
    pub redirect: Option<String>,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: ViewId) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn redirect_to(mut self, name: impl Into<String>) -> Self {
        self.redirect = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),
    #[error("route `{route}` redirects to unknown route `{target}`")]
    UnknownRedirect { route: String, target: String },
    #[error("redirect cycle detected starting at route `{0}`")]
    RedirectCycle(String),
    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },
    #[error("parameter `{param}` of route `{route}` is already bound by a parent route")]
    DuplicateParam { route: String, param: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no route named `{0}`")]
    UnknownName(String),
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },
    #[error("too many redirects while resolving `{0}`")]
    TooManyRedirects(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param { name: String, optional: bool },
}

/// A parsed path pattern such as `/`, `:chatId?` or `/chats/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    fn parse(raw: &str) -> Result<Self, RouteTableError> {
        let invalid = |reason| RouteTableError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut seen_optional = false;
        for part in raw.split('/').filter(|p| !p.is_empty()) {
            if seen_optional {
                // optional parameters may only trail the pattern
                return Err(invalid("segment after an optional parameter"));
            }
            let segment = match part.strip_prefix(':') {
                Some(param) => {
                    let (name, optional) = match param.strip_suffix('?') {
                        Some(name) => (name, true),
                        None => (param, false),
                    };
                    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return Err(invalid("parameter name must be a non-empty identifier"));
                    }
                    seen_optional = optional;
                    Segment::Param { name: name.to_string(), optional }
                }
                None => Segment::Static(part.to_string()),
            };
            segments.push(segment);
        }
        Ok(Self { segments })
    }

    fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Every way this pattern can consume a prefix of `path`, longest first.
    fn match_prefix(&self, path: &[String]) -> Vec<(RouteParams, usize)> {
        let mut params = RouteParams::new();
        let mut consumed = 0;
        let mut candidates = Vec::new();
        let mut exhausted = false;

        for segment in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    if path.get(consumed) != Some(expected) {
                        return Vec::new();
                    }
                    consumed += 1;
                }
                Segment::Param { name, optional: false } => {
                    let Some(value) = path.get(consumed) else {
                        return Vec::new();
                    };
                    params.insert(name.clone(), value.clone());
                    consumed += 1;
                }
                Segment::Param { name, optional: true } => {
                    candidates.push((params.clone(), consumed));
                    match path.get(consumed) {
                        Some(value) => {
                            params.insert(name.clone(), value.clone());
                            consumed += 1;
                        }
                        None => {
                            exhausted = true;
                            break;
                        }
                    }
                }
            }
        }
        if !exhausted {
            candidates.push((params, consumed));
        }
        candidates.reverse();
        candidates
    }

    fn render(&self, route: &str, params: &RouteParams, out: &mut Vec<String>) -> Result<(), ResolveError> {
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => out.push(s.clone()),
                Segment::Param { name, optional } => match params.get(name) {
                    Some(value) => out.push(utf8_percent_encode(value, PATH_SEGMENT).to_string()),
                    None if *optional => {}
                    None => {
                        return Err(ResolveError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        });
                    }
                },
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    name: String,
    view: ViewId,
    pattern: RoutePattern,
    redirect: Option<String>,
    children: Vec<CompiledEntry>,
}

/// Result of resolving a path that matched a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// Logical name of the matched leaf entry.
    pub name: String,
    /// View rendered by the matched leaf entry.
    pub view: ViewId,
    /// Views of the enclosing entries, outermost first.
    pub layouts: Vec<ViewId>,
    pub params: RouteParams,
    /// Entry whose redirect led here, if any.
    pub redirected_from: Option<String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Tagged outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Matched(ResolvedRoute),
    NotFound { path: String },
}

/// What the application shows for a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppView {
    Chat { chat_id: Option<String> },
    NotFound,
}

impl Resolution {
    pub fn app_view(&self) -> AppView {
        match self {
            Resolution::Matched(route) if route.name == CHAT_ROUTE => AppView::Chat {
                chat_id: route.param(CHAT_ID_PARAM).map(str::to_string),
            },
            _ => AppView::NotFound,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }
}

/// Immutable, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<CompiledEntry>,
    /// Child-index path of every named entry.
    by_name: BTreeMap<String, Vec<usize>>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut by_name = BTreeMap::new();
        let mut compiled = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            compiled.push(compile_entry(entry, vec![index], &BTreeSet::new(), &mut by_name)?);
        }
        let table = Self { entries: compiled, by_name };
        table.check_redirects()?;
        Ok(table)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Resolves `path` against the entries in declaration order.
    ///
    /// Query strings and fragments are ignored, as are empty segments.
    /// Segments are percent-decoded before they are bound to parameters.
    pub fn resolve(&self, path: &str) -> Resolution {
        let segments = split_path(path);
        for entry in &self.entries {
            if let Some(found) = self.match_entry(entry, &segments, &RouteParams::new(), &[]) {
                return Resolution::Matched(found);
            }
        }
        Resolution::NotFound { path: path.to_string() }
    }

    /// Resolves a route by logical name, following redirects.
    pub fn resolve_name(&self, name: &str, params: &RouteParams) -> Result<ResolvedRoute, ResolveError> {
        self.resolve_named(name, params.clone(), None, 0)
    }

    /// Builds the href of a named route. Omitted optional parameters are left out.
    pub fn path_for(&self, name: &str, params: &RouteParams) -> Result<String, ResolveError> {
        let chain = self.chain(name)?;
        let mut segments = Vec::new();
        for entry in &chain {
            entry.pattern.render(name, params, &mut segments)?;
        }
        Ok(format!("/{}", segments.join("/")))
    }

    fn match_entry(
        &self,
        entry: &CompiledEntry,
        path: &[String],
        inherited: &RouteParams,
        layouts: &[ViewId],
    ) -> Option<ResolvedRoute> {
        for (params, consumed) in entry.pattern.match_prefix(path) {
            let mut merged = inherited.clone();
            merged.extend(params);
            let rest = &path[consumed..];

            // redirect wins over children
            if rest.is_empty() {
                if let Some(target) = &entry.redirect {
                    return self.resolve_named(target, merged, Some(entry.name.clone()), 0).ok();
                }
            }

            let mut chain = layouts.to_vec();
            chain.push(entry.view);
            for child in &entry.children {
                if let Some(found) = self.match_entry(child, rest, &merged, &chain) {
                    return Some(found);
                }
            }

            if rest.is_empty() {
                return Some(ResolvedRoute {
                    name: entry.name.clone(),
                    view: entry.view,
                    layouts: layouts.to_vec(),
                    params: merged,
                    redirected_from: None,
                });
            }
        }
        None
    }

    fn resolve_named(
        &self,
        name: &str,
        params: RouteParams,
        redirected_from: Option<String>,
        depth: usize,
    ) -> Result<ResolvedRoute, ResolveError> {
        if depth > MAX_REDIRECTS {
            return Err(ResolveError::TooManyRedirects(name.to_string()));
        }
        let chain = self.chain(name)?;
        let Some((leaf, parents)) = chain.split_last() else {
            return Err(ResolveError::UnknownName(name.to_string()));
        };
        if let Some(target) = &leaf.redirect {
            let from = redirected_from.unwrap_or_else(|| leaf.name.clone());
            return self.resolve_named(target, params, Some(from), depth + 1);
        }

        let mut declared = RouteParams::new();
        for entry in &chain {
            for param in entry.pattern.param_names() {
                if let Some(value) = params.get(param) {
                    declared.insert(param.to_string(), value.clone());
                }
            }
        }
        // rendering validates that every required parameter is present
        let mut scratch = Vec::new();
        for entry in &chain {
            entry.pattern.render(name, &declared, &mut scratch)?;
        }

        Ok(ResolvedRoute {
            name: leaf.name.clone(),
            view: leaf.view,
            layouts: parents.iter().map(|e| e.view).collect(),
            params: declared,
            redirected_from,
        })
    }

    /// Entries from the top level down to the entry named `name`.
    fn chain(&self, name: &str) -> Result<Vec<&CompiledEntry>, ResolveError> {
        let indices = self
            .by_name
            .get(name)
            .ok_or_else(|| ResolveError::UnknownName(name.to_string()))?;
        let mut chain = Vec::with_capacity(indices.len());
        let mut level = &self.entries;
        for &index in indices {
            let entry = &level[index];
            chain.push(entry);
            level = &entry.children;
        }
        Ok(chain)
    }

    fn check_redirects(&self) -> Result<(), RouteTableError> {
        for name in self.by_name.keys() {
            let mut visited = BTreeSet::new();
            let mut current = name.as_str();
            loop {
                if !visited.insert(current) {
                    return Err(RouteTableError::RedirectCycle(name.clone()));
                }
                let chain = self.chain(current).map_err(|_| RouteTableError::RedirectCycle(name.clone()))?;
                let Some(target) = chain.last().copied().and_then(|e| e.redirect.as_deref()) else {
                    break;
                };
                if !self.by_name.contains_key(target) {
                    return Err(RouteTableError::UnknownRedirect {
                        route: current.to_string(),
                        target: target.to_string(),
                    });
                }
                current = target;
            }
        }
        Ok(())
    }
}

fn compile_entry(
    entry: RouteEntry,
    index_path: Vec<usize>,
    inherited_params: &BTreeSet<String>,
    by_name: &mut BTreeMap<String, Vec<usize>>,
) -> Result<CompiledEntry, RouteTableError> {
    let pattern = RoutePattern::parse(&entry.path)?;

    let mut params = inherited_params.clone();
    for param in pattern.param_names() {
        if !params.insert(param.to_string()) {
            return Err(RouteTableError::DuplicateParam {
                route: entry.name,
                param: param.to_string(),
            });
        }
    }

    if by_name.insert(entry.name.clone(), index_path.clone()).is_some() {
        return Err(RouteTableError::DuplicateName(entry.name));
    }

    let mut children = Vec::with_capacity(entry.children.len());
    for (index, child) in entry.children.into_iter().enumerate() {
        let mut child_path = index_path.clone();
        child_path.push(index);
        children.push(compile_entry(child, child_path, &params, by_name)?);
    }

    Ok(CompiledEntry {
        name: entry.name,
        view: entry.view,
        pattern,
        redirect: entry.redirect,
        children,
    })
}

fn split_path(path: &str) -> Vec<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

/// The chatbot route table: `/` redirects to `Chat`, whose `:chatId?` child
/// catches every single-segment path.
pub fn chatbot_routes() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(vec![
        RouteEntry::new("/", ROOT_ROUTE, ViewId::ChatbotLayout)
            .redirect_to(CHAT_ROUTE)
            .with_children(vec![RouteEntry::new(":chatId?", CHAT_ROUTE, ViewId::Chatbot)]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn routes() -> RouteTable {
        chatbot_routes().expect("chatbot routes are valid")
    }

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn root_redirects_to_chat_without_id() {
        let Resolution::Matched(route) = routes().resolve("/") else {
            panic!("root must resolve");
        };
        assert_eq!(route.name, CHAT_ROUTE);
        assert_eq!(route.view, ViewId::Chatbot);
        assert_eq!(route.layouts, vec![ViewId::ChatbotLayout]);
        assert_eq!(route.param(CHAT_ID_PARAM), None);
        assert_eq!(route.redirected_from.as_deref(), Some(ROOT_ROUTE));
    }

    #[test]
    fn segment_is_bound_to_chat_id() {
        let Resolution::Matched(route) = routes().resolve("/abc123") else {
            panic!("single segment must resolve");
        };
        assert_eq!(route.name, CHAT_ROUTE);
        assert_eq!(route.param(CHAT_ID_PARAM), Some("abc123"));
        assert_eq!(route.redirected_from, None);
    }

    #[rstest]
    #[case("/", None)]
    #[case("", None)]
    #[case("/abc123", Some("abc123"))]
    #[case("/abc123/", Some("abc123"))]
    #[case("//abc123", Some("abc123"))]
    #[case("/abc123?tab=sources", Some("abc123"))]
    #[case("/abc123#last", Some("abc123"))]
    #[case("/?x=1", None)]
    #[case("/abc%20def", Some("abc def"))]
    #[case("/a%2Fb", Some("a/b"))]
    #[case("/caf%C3%A9", Some("café"))]
    #[case("/0b7e3a52-2f8c-4b1e-9f3d-0e6f5c1a2d44", Some("0b7e3a52-2f8c-4b1e-9f3d-0e6f5c1a2d44"))]
    fn chat_view_is_a_catch_all(#[case] path: &str, #[case] chat_id: Option<&str>) {
        assert_eq!(
            routes().resolve(path).app_view(),
            AppView::Chat { chat_id: chat_id.map(str::to_string) }
        );
    }

    #[rstest]
    #[case("/a/b")]
    #[case("/chats/abc/extra")]
    fn deeper_paths_are_not_found(#[case] path: &str) {
        let resolution = routes().resolve(path);
        assert_eq!(resolution, Resolution::NotFound { path: path.to_string() });
        assert_eq!(resolution.app_view(), AppView::NotFound);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/", "Chat", ViewId::ChatbotLayout),
            RouteEntry::new("/other", "Chat", ViewId::Chatbot),
        ])
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateName("Chat".to_string()));
    }

    #[test]
    fn duplicate_names_across_levels_are_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/", ROOT_ROUTE, ViewId::ChatbotLayout)
                .with_children(vec![RouteEntry::new(":chatId?", ROOT_ROUTE, ViewId::Chatbot)]),
        ])
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateName(ROOT_ROUTE.to_string()));
    }

    #[test]
    fn unknown_redirect_target_is_rejected() {
        let err = RouteTable::new(vec![RouteEntry::new("/", ROOT_ROUTE, ViewId::ChatbotLayout).redirect_to("Missing")])
            .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::UnknownRedirect { route: ROOT_ROUTE.to_string(), target: "Missing".to_string() }
        );
    }

    #[test]
    fn redirect_cycle_is_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/a", "A", ViewId::Chatbot).redirect_to("B"),
            RouteEntry::new("/b", "B", ViewId::Chatbot).redirect_to("A"),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteTableError::RedirectCycle(_)));
    }

    #[rstest]
    #[case(":")]
    #[case(":?")]
    #[case(":chat-id")]
    #[case(":chatId?/more")]
    fn malformed_patterns_are_rejected(#[case] pattern: &str) {
        let err = RouteTable::new(vec![RouteEntry::new(pattern, "Broken", ViewId::Chatbot)]).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidPattern { .. }), "{pattern}: {err}");
    }

    #[test]
    fn parameter_shadowing_is_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/:id", "Parent", ViewId::ChatbotLayout)
                .with_children(vec![RouteEntry::new(":id", "Child", ViewId::Chatbot)]),
        ])
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateParam { route: "Child".to_string(), param: "id".to_string() });
    }

    #[test]
    fn entries_are_tested_in_declaration_order() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/settings", "Settings", ViewId::ChatbotLayout),
            RouteEntry::new("/:chatId", "Chat", ViewId::Chatbot),
        ])
        .expect("valid table");
        let Resolution::Matched(route) = table.resolve("/settings") else {
            panic!("settings must resolve");
        };
        assert_eq!(route.name, "Settings");
    }

    #[test]
    fn parent_without_redirect_matches_itself_when_no_child_does() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/chats", "Chats", ViewId::ChatbotLayout)
                .with_children(vec![RouteEntry::new(":chatId", "Chat", ViewId::Chatbot)]),
        ])
        .expect("valid table");
        let Resolution::Matched(route) = table.resolve("/chats") else {
            panic!("parent must resolve");
        };
        assert_eq!(route.name, "Chats");
        assert!(route.layouts.is_empty());

        let Resolution::Matched(route) = table.resolve("/chats/42") else {
            panic!("child must resolve");
        };
        assert_eq!(route.name, "Chat");
        assert_eq!(route.param("chatId"), Some("42"));
    }

    #[test]
    fn path_for_named_routes() {
        let table = routes();
        assert_eq!(table.path_for(CHAT_ROUTE, &RouteParams::new()).unwrap(), "/");
        assert_eq!(table.path_for(CHAT_ROUTE, &params(&[(CHAT_ID_PARAM, "abc")])).unwrap(), "/abc");
        assert_eq!(table.path_for(ROOT_ROUTE, &RouteParams::new()).unwrap(), "/");
        assert_eq!(
            table.path_for("Nope", &RouteParams::new()).unwrap_err(),
            ResolveError::UnknownName("Nope".to_string())
        );
    }

    #[rstest]
    #[case("abc def", "/abc%20def")]
    #[case("a/b", "/a%2Fb")]
    #[case("a?x#y", "/a%3Fx%23y")]
    #[case("100%", "/100%25")]
    #[case("café", "/caf%C3%A9")]
    fn path_for_encodes_params_and_round_trips(#[case] chat_id: &str, #[case] href: &str) {
        let table = routes();
        let rendered = table.path_for(CHAT_ROUTE, &params(&[(CHAT_ID_PARAM, chat_id)])).unwrap();
        assert_eq!(rendered, href);
        assert_eq!(
            table.resolve(&rendered).app_view(),
            AppView::Chat { chat_id: Some(chat_id.to_string()) }
        );
    }

    #[test]
    fn path_for_requires_mandatory_params() {
        let table = RouteTable::new(vec![RouteEntry::new("/chats/:chatId", "Chat", ViewId::Chatbot)]).expect("valid");
        assert_eq!(
            table.path_for("Chat", &RouteParams::new()).unwrap_err(),
            ResolveError::MissingParam { route: "Chat".to_string(), param: "chatId".to_string() }
        );
    }

    #[test]
    fn resolve_name_follows_redirects() {
        let route = routes().resolve_name(ROOT_ROUTE, &RouteParams::new()).expect("root resolves");
        assert_eq!(route.name, CHAT_ROUTE);
        assert_eq!(route.redirected_from.as_deref(), Some(ROOT_ROUTE));

        let route = routes()
            .resolve_name(CHAT_ROUTE, &params(&[(CHAT_ID_PARAM, "x"), ("unrelated", "y")]))
            .expect("chat resolves");
        assert_eq!(route.params, params(&[(CHAT_ID_PARAM, "x")]));
    }

    #[test]
    fn table_lists_its_names() {
        let names: Vec<_> = routes().names().map(str::to_string).collect();
        assert_eq!(names, vec![CHAT_ROUTE.to_string(), ROOT_ROUTE.to_string()]);
    }
}
