// crates/agent-forge-core/src/catalog.rs
// ============================================================================
// Module: Template Catalog
// Description: Built-in template pack for the generated agent service.
// Purpose: Describe every generated file, its body, and its emit condition.
// Dependencies: none (assets are embedded static data)
// ============================================================================

//! ## Overview
//! The catalog is the single source of truth for what generation produces: an
//! ordered table of assets, each pairing a Jinja path template (relative to
//! the generated project root) with an embedded body. Assets marked
//! [`AssetKind::Verbatim`] are copied byte-for-byte; everything else passes
//! through the substitution engine. Conditional assets are emitted only when
//! the matching parameter toggle is on.
//!
//! The essential-file and syntax-check lists used by verification live here
//! too, so the generation contract and its checks cannot drift apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::params::TemplateParams;

// ============================================================================
// SECTION: Asset Types
// ============================================================================

/// How an asset body is produced from its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Body passes through the substitution engine.
    Rendered,
    /// Body is copied byte-for-byte.
    Verbatim,
}

/// When an asset is included in the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCondition {
    /// Asset is always generated.
    Always,
    /// Asset is generated only when the LangSmith tracing toggle is on.
    LangSmith,
    /// Asset is generated only when the Microsoft Bot Framework toggle is on.
    MicrosoftBotFramework,
}

impl AssetCondition {
    /// Returns whether the condition holds for the given parameters.
    #[must_use]
    pub const fn is_enabled(self, params: &TemplateParams) -> bool {
        match self {
            Self::Always => true,
            Self::LangSmith => params.use_langsmith,
            Self::MicrosoftBotFramework => params.use_microsoft_bot_framework,
        }
    }
}

/// One file of the template pack.
///
/// # Invariants
/// - `path` is a Jinja path template that renders to a safe relative path for
///   every valid parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Path template relative to the generated project root.
    pub path: &'static str,
    /// Embedded template body.
    pub body: &'static str,
    /// Body handling.
    pub kind: AssetKind,
    /// Emit condition.
    pub condition: AssetCondition,
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// The built-in template pack.
#[derive(Debug, Clone, Copy)]
pub struct TemplateCatalog {
    /// Asset table backing this catalog.
    assets: &'static [TemplateAsset],
}

impl TemplateCatalog {
    /// Returns the built-in catalog.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            assets: BUILTIN_ASSETS,
        }
    }

    /// Returns every asset in catalog order.
    #[must_use]
    pub const fn assets(&self) -> &'static [TemplateAsset] {
        self.assets
    }

    /// Returns the assets selected by the given parameters.
    #[must_use]
    pub fn assets_for(&self, params: &TemplateParams) -> Vec<&'static TemplateAsset> {
        self.assets
            .iter()
            .filter(|asset| asset.condition.is_enabled(params))
            .collect()
    }

    /// Returns the number of assets in the catalog.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// SECTION: Verification Contracts
// ============================================================================

/// Path templates whose rendered forms must exist in every generated project.
pub const ESSENTIAL_FILES: &[&str] = &[
    "main.py",
    "pyproject.toml",
    "Dockerfile",
    "docker-compose.yml",
    "README.md",
    ".gitignore",
    ".python-version",
    "ENV_VARS.md",
    "app/__init__.py",
    "app/infrastructure/config/config.py",
    "app/domain/entities/{{ domain_name }}.py",
    "app/presentation/{{ domain_name }}_router.py",
];

/// Path templates of Python sources reported individually by the syntax check.
pub const SYNTAX_CHECK_FILES: &[&str] = &[
    "main.py",
    "app/infrastructure/config/config.py",
    "app/infrastructure/llm/llm_factory.py",
    "app/infrastructure/llm/openai_service.py",
];

// ============================================================================
// SECTION: Asset Table
// ============================================================================

/// Builds an always-on rendered asset entry.
const fn rendered(path: &'static str, body: &'static str) -> TemplateAsset {
    TemplateAsset {
        path,
        body,
        kind: AssetKind::Rendered,
        condition: AssetCondition::Always,
    }
}

/// Builds an always-on verbatim asset entry.
const fn verbatim(path: &'static str, body: &'static str) -> TemplateAsset {
    TemplateAsset {
        path,
        body,
        kind: AssetKind::Verbatim,
        condition: AssetCondition::Always,
    }
}

/// Builds a conditional rendered asset entry.
const fn conditional(
    path: &'static str,
    body: &'static str,
    condition: AssetCondition,
) -> TemplateAsset {
    TemplateAsset {
        path,
        body,
        kind: AssetKind::Rendered,
        condition,
    }
}

/// The complete asset table, project root first, then the `app` tree.
const BUILTIN_ASSETS: &[TemplateAsset] = &[
    rendered("main.py", include_str!("../templates/main.py.j2")),
    rendered("pyproject.toml", include_str!("../templates/pyproject.toml.j2")),
    rendered("Dockerfile", include_str!("../templates/Dockerfile.j2")),
    rendered(
        "docker-compose.yml",
        include_str!("../templates/docker-compose.yml.j2"),
    ),
    rendered("README.md", include_str!("../templates/README.md.j2")),
    verbatim(".gitignore", include_str!("../templates/gitignore.j2")),
    rendered(".python-version", include_str!("../templates/python-version.j2")),
    rendered(".env.example", include_str!("../templates/env.example.j2")),
    rendered("ENV_VARS.md", include_str!("../templates/ENV_VARS.md.j2")),
    rendered("app/__init__.py", include_str!("../templates/app/__init__.py.j2")),
    rendered(
        "app/presentation/__init__.py",
        include_str!("../templates/app/presentation/__init__.py.j2"),
    ),
    rendered(
        "app/presentation/{{ domain_name }}_router.py",
        include_str!("../templates/app/presentation/domain_router.py.j2"),
    ),
    conditional(
        "app/presentation/bot_router.py",
        include_str!("../templates/app/presentation/bot_router.py.j2"),
        AssetCondition::MicrosoftBotFramework,
    ),
    rendered(
        "app/application/__init__.py",
        include_str!("../templates/app/application/__init__.py.j2"),
    ),
    rendered(
        "app/application/interfaces/__init__.py",
        include_str!("../templates/app/application/interfaces/__init__.py.j2"),
    ),
    rendered(
        "app/application/interfaces/illm_service.py",
        include_str!("../templates/app/application/interfaces/illm_service.py.j2"),
    ),
    rendered(
        "app/application/services/__init__.py",
        include_str!("../templates/app/application/services/__init__.py.j2"),
    ),
    rendered(
        "app/application/services/{{ agent_module }}_service.py",
        include_str!("../templates/app/application/services/agent_service.py.j2"),
    ),
    rendered(
        "app/application/agent/__init__.py",
        include_str!("../templates/app/application/agent/__init__.py.j2"),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/__init__.py",
        include_str!("../templates/app/application/agent/agent_module/__init__.py.j2"),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/agent_builder/__init__.py",
        include_str!("../templates/app/application/agent/agent_module/agent_builder/__init__.py.j2"),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/agent_builder/{{ agent_module }}_agent_builder.py",
        include_str!(
            "../templates/app/application/agent/agent_module/agent_builder/agent_builder.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/agent_builder/decision_router.py",
        include_str!(
            "../templates/app/application/agent/agent_module/agent_builder/decision_router.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/__init__.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/__init__.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/{{ agent_module }}_node/__init__.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/main_node/__init__.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/{{ agent_module }}_node/node.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/main_node/node.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/reflect_node/__init__.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/reflect_node/__init__.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/reflect_node/node.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/reflect_node/node.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/adjust_node/__init__.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/adjust_node/__init__.py.j2"
        ),
    ),
    rendered(
        "app/application/agent/{{ agent_module }}/node_functions/adjust_node/node.py",
        include_str!(
            "../templates/app/application/agent/agent_module/node_functions/adjust_node/node.py.j2"
        ),
    ),
    rendered(
        "app/domain/__init__.py",
        include_str!("../templates/app/domain/__init__.py.j2"),
    ),
    rendered(
        "app/domain/entities/__init__.py",
        include_str!("../templates/app/domain/entities/__init__.py.j2"),
    ),
    rendered(
        "app/domain/entities/{{ domain_name }}.py",
        include_str!("../templates/app/domain/entities/domain.py.j2"),
    ),
    rendered(
        "app/domain/entities/{{ agent_module }}_output.py",
        include_str!("../templates/app/domain/entities/agent_output.py.j2"),
    ),
    rendered(
        "app/domain/state/__init__.py",
        include_str!("../templates/app/domain/state/__init__.py.j2"),
    ),
    rendered(
        "app/domain/state/{{ agent_module }}_state.py",
        include_str!("../templates/app/domain/state/agent_state.py.j2"),
    ),
    rendered(
        "app/infrastructure/__init__.py",
        include_str!("../templates/app/infrastructure/__init__.py.j2"),
    ),
    rendered(
        "app/infrastructure/config/__init__.py",
        include_str!("../templates/app/infrastructure/config/__init__.py.j2"),
    ),
    rendered(
        "app/infrastructure/config/config.py",
        include_str!("../templates/app/infrastructure/config/config.py.j2"),
    ),
    rendered(
        "app/infrastructure/llm/__init__.py",
        include_str!("../templates/app/infrastructure/llm/__init__.py.j2"),
    ),
    rendered(
        "app/infrastructure/llm/llm_factory.py",
        include_str!("../templates/app/infrastructure/llm/llm_factory.py.j2"),
    ),
    rendered(
        "app/infrastructure/llm/openai_service.py",
        include_str!("../templates/app/infrastructure/llm/openai_service.py.j2"),
    ),
];
