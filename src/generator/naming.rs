/// Returns the file name of `path` without its final extension.
///
/// A name without any extension yields an empty string, as does a dotfile
/// such as `.tfvars` whose whole name is the extension.
pub fn stem_of(path: &str) -> String {
    let file_name = base_name(path);
    match file_name.rfind('.') {
        Some(index) => file_name[..index].to_string(),
        None => String::new(),
    }
}

/// Last `/`-separated segment of `path`
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Builds the identifier shared by a project and its workflow.
///
/// `components/vpc` with `components/vpc/dev.tfvars` gives `components-vpc-dev`;
/// a component at the scan root (`.`) gives just `dev`.
pub fn friendly_name(component_path: &str, variable_file: &str) -> String {
    let environment = stem_of(base_name(variable_file));
    if component_path == "." {
        return environment;
    }

    let name = format!("{}-{}", component_path.replace('/', "-"), environment);
    match name.strip_suffix('-') {
        Some(trimmed) => trimmed.to_string(),
        None => name,
    }
}
