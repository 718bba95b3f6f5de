use serde::Deserialize;

/// The `name` field every managed JSON object carries.
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}


impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
