use std::path::PathBuf;

/// Namespace used whenever a template or the environment does not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Runtime options for `jobkeeper create`, decoded from the environment by
/// the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct CreateOpts {
    /// Pull secret names appended to the template's pod spec, in order.
    pub image_pull_secrets: Vec<String>,

    /// Path to the Job manifest to submit.
    pub job_template_path: PathBuf,

    /// Selector identifying equivalent runs of this job.
    pub label_selector: String,

    /// When false, an active equivalent run suppresses submission.
    pub allow_concurrency: bool,
}

/// Runtime options for `jobkeeper remove-all`.
#[derive(Debug, Clone, Default)]
pub struct RemoveAllOpts {
    /// Selector identifying the jobs to remove.
    pub label_selector: String,

    /// Namespace to remove them from.
    pub job_namespace: String,
}

pub fn namespace_or_default(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_namespace_falls_back() {
        assert_eq!(namespace_or_default(""), "default");
    }

    #[test]
    fn test_declared_namespace_wins() {
        assert_eq!(namespace_or_default("staging"), "staging");
    }
}
