//! Source adapter selection.
//!
//! A Source node becomes a call to one of a fixed set of media-ingest
//! plugins. The choice depends only on the node's plugin hint.

/// A media-ingest plugin call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceAdapter {
    /// Hint value that selects this adapter.
    pub hint: &'static str,
    /// Call target under `core`, e.g. `"lsmas.LWLibavSource"`.
    pub function: &'static str,
}

/// Used when the hint is absent or not in [`SOURCE_ADAPTERS`].
pub const DEFAULT_ADAPTER: SourceAdapter = SourceAdapter {
    hint: "ffms2",
    function: "ffms2.Source",
};

pub const SOURCE_ADAPTERS: &[SourceAdapter] = &[
    SourceAdapter {
        hint: "lsmashsource",
        function: "lsmas.LWLibavSource",
    },
    SourceAdapter {
        hint: "bestsource",
        function: "bs.VideoSource",
    },
    SourceAdapter {
        hint: "d2vsource",
        function: "d2v.Source",
    },
    SourceAdapter {
        hint: "dgdecnv",
        function: "dgdecodenv.DGSource",
    },
];

/// Pick the adapter for a hint. Matching ignores ASCII case and surrounding whitespace.
pub fn select_adapter(hint: Option<&str>) -> &'static SourceAdapter {
    let Some(hint) = hint.map(str::trim) else {
        return &DEFAULT_ADAPTER;
    };
    SOURCE_ADAPTERS
        .iter()
        .find(|adapter| adapter.hint.eq_ignore_ascii_case(hint))
        .unwrap_or(&DEFAULT_ADAPTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_without_hint() {
        assert_eq!(select_adapter(None).function, "ffms2.Source");
    }

    #[test]
    fn test_lsmash_hint() {
        assert_eq!(
            select_adapter(Some("lsmashsource")).function,
            "lsmas.LWLibavSource"
        );
        assert_eq!(
            select_adapter(Some("  LSmashSource ")).function,
            "lsmas.LWLibavSource"
        );
    }

    #[test]
    fn test_unknown_hint_falls_back() {
        assert_eq!(select_adapter(Some("avisource")), &DEFAULT_ADAPTER);
        assert_eq!(select_adapter(Some("")), &DEFAULT_ADAPTER);
    }

    #[test]
    fn test_every_hint_maps_to_its_plugin() {
        let expected = [
            ("lsmashsource", "lsmas.LWLibavSource"),
            ("bestsource", "bs.VideoSource"),
            ("d2vsource", "d2v.Source"),
            ("dgdecnv", "dgdecodenv.DGSource"),
        ];
        for (hint, function) in expected {
            assert_eq!(select_adapter(Some(hint)).function, function, "hint {}", hint);
            let shouted = hint.to_ascii_uppercase();
            assert_eq!(select_adapter(Some(&shouted)).function, function);
        }
        assert_eq!(SOURCE_ADAPTERS.len(), expected.len());
        assert_eq!(DEFAULT_ADAPTER.function, "ffms2.Source");
    }

    #[test]
    fn test_table_is_unambiguous() {
        for (i, a) in SOURCE_ADAPTERS.iter().enumerate() {
            for b in &SOURCE_ADAPTERS[i + 1..] {
                assert!(!a.hint.eq_ignore_ascii_case(b.hint));
            }
            assert_ne!(a.function, DEFAULT_ADAPTER.function);
        }
    }
}
