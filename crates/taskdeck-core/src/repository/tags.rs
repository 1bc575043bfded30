use crate::clock::Clock;
use crate::models::{Tag, TagId, Task};
use crate::repository::{InMemoryRepository, TagRepository};

impl<C: Clock> TagRepository for InMemoryRepository<C> {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn get_tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| &tag.id == id)
    }

    fn resolve_tags(&self, task: &Task) -> Vec<&Tag> {
        task.tags.iter().filter_map(|id| self.get_tag(id)).collect()
    }
}
