crate::define_id_enum! {
    /// Ecosystem a project is built for. Python specializations are only
    /// reachable through [`EcosystemTag::refine`].
    EcosystemTag {
        Python => "python",
        PythonCuda => "python-cuda" | "cuda",
        PythonFlask => "python-flask" | "flask",
        PythonStreamlit => "python-streamlit" | "streamlit",
        PythonGradio => "python-gradio" | "gradio",
        Node => "node" | "javascript",
        Bash => "bash" | "shell",
        Java => "java",
        Cpp => "cpp" | "c++" | "c",
    }
}

/// Refinements in priority order: first matching dependency marker wins.
const REFINEMENTS: &[(&[&str], EcosystemTag)] = &[
    (&["torch", "tensorflow"], EcosystemTag::PythonCuda),
    (&["flask"], EcosystemTag::PythonFlask),
    (&["streamlit"], EcosystemTag::PythonStreamlit),
    (&["gradio"], EcosystemTag::PythonGradio),
];

impl EcosystemTag {
    /// Tags the classifier can produce, in tie-break order.
    pub const FAMILIES: [EcosystemTag; 5] = [
        EcosystemTag::Python,
        EcosystemTag::Node,
        EcosystemTag::Bash,
        EcosystemTag::Java,
        EcosystemTag::Cpp,
    ];

    pub fn is_python_family(&self) -> bool {
        matches!(
            self,
            Self::Python
                | Self::PythonCuda
                | Self::PythonFlask
                | Self::PythonStreamlit
                | Self::PythonGradio
        )
    }

    /// Narrows plain `python` to a framework specialization based on the
    /// external dependency names. Any other tag is returned unchanged, so a
    /// refined tag is never refined again.
    pub fn refine<S: AsRef<str>>(self, dependencies: &[S]) -> Self {
        if self != Self::Python {
            return self;
        }

        REFINEMENTS
            .iter()
            .find(|(markers, _)| {
                dependencies
                    .iter()
                    .any(|dep| markers.contains(&dep.as_ref()))
            })
            .map(|(_, tag)| *tag)
            .unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for tag in EcosystemTag::all_variants() {
            assert_eq!(tag.name().parse::<EcosystemTag>().unwrap(), *tag);
        }
    }

    #[test]
    fn test_from_name_with_aliases() {
        assert_eq!(EcosystemTag::from_name("c++"), Some(EcosystemTag::Cpp));
        assert_eq!(EcosystemTag::from_name("flask"), Some(EcosystemTag::PythonFlask));
        assert_eq!(EcosystemTag::from_name("unknown"), None);
        assert!("ruby".parse::<EcosystemTag>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        assert_eq!(
            serde_json::to_string(&EcosystemTag::PythonStreamlit).unwrap(),
            "\"python-streamlit\""
        );
        let tag: EcosystemTag = serde_json::from_str("\"cpp\"").unwrap();
        assert_eq!(tag, EcosystemTag::Cpp);
        assert!(serde_json::from_str::<EcosystemTag>("\"cobol\"").is_err());
    }

    #[test]
    fn test_python_family() {
        assert!(EcosystemTag::Python.is_python_family());
        assert!(EcosystemTag::PythonGradio.is_python_family());
        assert!(!EcosystemTag::Node.is_python_family());
    }

    #[parameterized(
        torch = { &["numpy", "torch"], EcosystemTag::PythonCuda },
        tensorflow = { &["tensorflow"], EcosystemTag::PythonCuda },
        flask = { &["flask", "requests"], EcosystemTag::PythonFlask },
        streamlit = { &["streamlit"], EcosystemTag::PythonStreamlit },
        gradio = { &["gradio"], EcosystemTag::PythonGradio },
        gpu_beats_web = { &["flask", "torch"], EcosystemTag::PythonCuda },
        flask_beats_ui = { &["gradio", "streamlit", "flask"], EcosystemTag::PythonFlask },
        streamlit_beats_gradio = { &["gradio", "streamlit"], EcosystemTag::PythonStreamlit },
        none = { &["requests", "numpy"], EcosystemTag::Python },
        empty = { &[], EcosystemTag::Python },
    )]
    fn test_refine_python(deps: &[&str], expected: EcosystemTag) {
        assert_eq!(EcosystemTag::Python.refine(deps), expected);
    }

    #[test]
    fn test_refine_leaves_other_tags_alone() {
        assert_eq!(EcosystemTag::Node.refine(&["flask"]), EcosystemTag::Node);
        assert_eq!(
            EcosystemTag::PythonFlask.refine(&["torch"]),
            EcosystemTag::PythonFlask
        );
    }
}
