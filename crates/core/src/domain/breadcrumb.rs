use super::RelativePath;

pub const ROOT_LABEL: &str = "Root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub path: RelativePath,
}

/// Trail from the root down to `path`, both ends included.
pub fn breadcrumbs_of(path: &RelativePath) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::with_capacity(path.depth() + 1);
    crumbs.push(Breadcrumb {
        name: ROOT_LABEL.to_string(),
        path: RelativePath::root(),
    });

    let mut prefix = RelativePath::root();
    for segment in path.segments() {
        prefix = prefix.child(segment);
        crumbs.push(Breadcrumb {
            name: segment.to_string(),
            path: prefix.clone(),
        });
    }

    crumbs
}
