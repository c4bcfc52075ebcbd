//! Templates compiled into the binary

macro_rules! builtin {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!("../../templates/", $name, ".j2")),
        )
    };
}

pub(crate) const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    builtin!("php-cs-fixer.dist.php"),
    builtin!("tools/php-cs-fixer/composer.json"),
    builtin!("phpstan.neon"),
    builtin!("tools/phpstan/composer.json"),
    builtin!("rector.php"),
    builtin!("tools/rector/composer.json"),
    builtin!("phpunit.dist.xml"),
    builtin!("ddev/config.yaml"),
    builtin!("Makefile"),
    builtin!("ci/gitlab-ci.yml"),
    builtin!("ci/github/workflows/ci.yml"),
    builtin!("ci/azure-pipelines.yml"),
    builtin!("tools/.gitignore"),
];

/// Names of all built-in templates
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
}
