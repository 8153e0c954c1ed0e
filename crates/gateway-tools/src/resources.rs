//! URI-template matching for the resource surface (§4.8, §6.4):
//! `…://{network}/address/{address}/balance`-style templates bound
//! against a concrete URI, plus bare (unparameterized) resource literals
//! such as `iota://info`.

use std::collections::HashMap;

/// A declared resource: either a `{placeholder}`-bearing template or a
/// bare literal URI.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

impl UriTemplate {
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .map(|part| {
                if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    Segment::Placeholder(name.to_string())
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// True if `uri` matches this template's shape exactly (same segment
    /// count, literal segments equal).
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = uri.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut bindings = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts.iter()) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    bindings.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(bindings)
    }

    /// True iff the template has no `{placeholder}` segments at all (a
    /// bare resource, e.g. `iota://info`).
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_path_variables() {
        let t = UriTemplate::parse("iota://{network}/address/{address}/balance");
        let bindings = t.matches("iota://shimmer/address/0xabc/balance").unwrap();
        assert_eq!(bindings.get("network").unwrap(), "shimmer");
        assert_eq!(bindings.get("address").unwrap(), "0xabc");
    }

    #[test]
    fn rejects_a_shape_mismatch() {
        let t = UriTemplate::parse("iota://{network}/address/{address}/balance");
        assert!(t.matches("iota://shimmer/address/0xabc/metrics").is_none());
    }

    #[test]
    fn bare_literal_has_no_placeholders() {
        let t = UriTemplate::parse("iota://info");
        assert!(t.is_literal());
        assert!(t.matches("iota://info").is_some());
    }
}
