//! Aggregation of the phase/category hierarchy with grade records

use eval_model::{CategoryId, CategoryNode, ExportTree, Grade, PhaseNode, UserId, Visibility};
use futures::future::try_join_all;
use std::collections::HashMap;
use store::{EvalStore, StoreError, StoreResult};

/// Build the export tree for one subject.
///
/// The hierarchy fetch (phases, then each phase's categories) and the
/// grade fetch are independent queries; they are issued concurrently and
/// joined before the merge step. The merge builds a category-identity
/// index in a single traversal and attaches each grade through it, so
/// the total cost is O(n + m) for n categories and m grades.
///
/// Fails with the underlying `StoreError` if either query fails.
pub async fn aggregate<S>(
    store: &S,
    subject: UserId,
    visibility: Visibility,
) -> Result<ExportTree, StoreError>
where
    S: EvalStore + ?Sized,
{
    let (mut tree, grades) = tokio::try_join!(
        fetch_hierarchy(store),
        store.find_grades(subject, visibility.grade_selection()),
    )?;

    merge_grades(&mut tree, grades);
    Ok(tree)
}

/// Fetch phases and their categories as an unannotated tree.
///
/// Category queries for all phases are issued together; results come
/// back in phase order regardless of completion order.
async fn fetch_hierarchy<S>(store: &S) -> StoreResult<ExportTree>
where
    S: EvalStore + ?Sized,
{
    let phases = store.find_phases().await?;

    let category_sets =
        try_join_all(phases.iter().map(|phase| store.find_categories(phase.id))).await?;

    let phases = phases
        .into_iter()
        .zip(category_sets)
        .map(|(phase, categories)| PhaseNode {
            title: phase.title,
            categories: categories
                .into_iter()
                .map(|c| CategoryNode::new(c.id, c.title, c.skills))
                .collect(),
        })
        .collect();

    Ok(ExportTree { phases })
}

/// Attach grade records to their categories in place.
///
/// Grades referencing a category identity absent from the tree are
/// skipped: a dangling reference must not fail the whole export.
fn merge_grades(tree: &mut ExportTree, grades: Vec<Grade>) {
    let index = category_index(tree);

    for grade in grades {
        let Some(&(phase_idx, cat_idx)) = index.get(&grade.category_id) else {
            tracing::debug!(
                category = %grade.category_id,
                "Skipping grade for unknown category"
            );
            continue;
        };

        let node = &mut tree.phases[phase_idx].categories[cat_idx];
        node.user_eval = grade.user_eval;
        node.validator_eval = grade.validator_eval;
    }
}

/// Map every category identity to its position in the tree.
///
/// One traversal of the tree; lookups during the merge are then O(1)
/// amortized instead of a per-grade scan of all categories.
fn category_index(tree: &ExportTree) -> HashMap<CategoryId, (usize, usize)> {
    let mut index = HashMap::with_capacity(tree.category_count());
    for (phase_idx, phase) in tree.phases.iter().enumerate() {
        for (cat_idx, category) in phase.categories.iter().enumerate() {
            index.insert(category.id, (phase_idx, cat_idx));
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eval_model::{Category, GradeSelection, Phase, PhaseId, User};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use store::MemoryEvalStore;

    fn fixture() -> (MemoryEvalStore, UserId, CategoryId) {
        let store = MemoryEvalStore::new();
        let user = User::new("Ada", "Lovelace", "ada@example.org");
        let user_id = user.id;
        store.insert_user(user);

        let phase = Phase::new("Core", 0);
        let phase_id = phase.id;
        store.insert_phase(phase);

        let cat = Category::new(
            phase_id,
            "Algorithms",
            vec!["Recursion".to_string(), "Sorting".to_string()],
            0,
        );
        let cat_id = cat.id;
        store.insert_category(cat);

        (store, user_id, cat_id)
    }

    #[tokio::test]
    async fn test_aggregate_attaches_evaluations() {
        let (store, user_id, cat_id) = fixture();
        store.insert_grade(
            Grade::new(user_id, cat_id, 0)
                .with_user_eval("B")
                .with_validator_eval("A"),
        );

        let tree = aggregate(&store, user_id, Visibility::Full).await.unwrap();
        assert_eq!(tree.phases.len(), 1);
        let cat = &tree.phases[0].categories[0];
        assert_eq!(cat.title, "Algorithms");
        assert_eq!(cat.skills, vec!["Recursion", "Sorting"]);
        assert_eq!(cat.user_eval.as_deref(), Some("B"));
        assert_eq!(cat.validator_eval.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_ungraded_categories_stay_unannotated() {
        let (store, user_id, _) = fixture();

        let tree = aggregate(&store, user_id, Visibility::Full).await.unwrap();
        let cat = &tree.phases[0].categories[0];
        assert_eq!(cat.user_eval, None);
        assert_eq!(cat.validator_eval, None);
    }

    #[tokio::test]
    async fn test_orphaned_grade_is_skipped() {
        let (store, user_id, cat_id) = fixture();
        store.insert_grade(Grade::new(user_id, cat_id, 0).with_user_eval("B"));
        // Grade pointing at a category that was deleted upstream
        store.insert_grade(Grade::new(user_id, CategoryId::new(), 1).with_user_eval("C"));

        let tree = aggregate(&store, user_id, Visibility::Full).await.unwrap();
        assert_eq!(tree.phases[0].categories[0].user_eval.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_mode_drives_grade_selection() {
        let (store, user_id, cat_id) = fixture();
        store.insert_grade(
            Grade::new(user_id, cat_id, 0)
                .with_user_eval("B")
                .with_validator_eval("A"),
        );

        let tree = aggregate(&store, user_id, Visibility::SelfOnly)
            .await
            .unwrap();
        let cat = &tree.phases[0].categories[0];
        // The store projection strips the unselected channel before merge
        assert_eq!(cat.user_eval.as_deref(), Some("B"));
        assert_eq!(cat.validator_eval, None);
    }

    #[test]
    fn test_index_covers_every_category_once() {
        let mut tree = ExportTree::empty();
        let mut ids = Vec::new();
        for p in 0..3 {
            let mut categories = Vec::new();
            for c in 0..4 {
                let node =
                    CategoryNode::new(CategoryId::new(), format!("cat {}-{}", p, c), vec![]);
                ids.push(node.id);
                categories.push(node);
            }
            tree.phases.push(PhaseNode {
                title: format!("phase {}", p),
                categories,
            });
        }

        let index = category_index(&tree);
        assert_eq!(index.len(), 12);
        for id in ids {
            assert!(index.contains_key(&id));
        }
    }

    /// Store wrapper that counts category queries, to pin down the merge
    /// cost: attaching m grades must not re-query or re-scan the
    /// hierarchy per grade.
    struct CountingStore {
        inner: MemoryEvalStore,
        category_queries: AtomicUsize,
    }

    #[async_trait]
    impl EvalStore for CountingStore {
        async fn find_phases(&self) -> StoreResult<Vec<Phase>> {
            self.inner.find_phases().await
        }

        async fn find_categories(&self, phase_id: PhaseId) -> StoreResult<Vec<Category>> {
            self.category_queries.fetch_add(1, Ordering::SeqCst);
            self.inner.find_categories(phase_id).await
        }

        async fn find_grades(
            &self,
            subject: UserId,
            selection: GradeSelection,
        ) -> StoreResult<Vec<Grade>> {
            self.inner.find_grades(subject, selection).await
        }

        async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
            self.inner.find_user(id).await
        }

        async fn find_user_by_token(&self, token: &str) -> StoreResult<Option<User>> {
            self.inner.find_user_by_token(token).await
        }
    }

    #[tokio::test]
    async fn test_one_category_query_per_phase_regardless_of_grades() {
        let (store, user_id, cat_id) = fixture();
        for order in 0..50 {
            // Only one grade can attach; the rest are orphans, but the
            // point is the query count stays O(phases)
            let target = if order == 0 { cat_id } else { CategoryId::new() };
            store.insert_grade(Grade::new(user_id, target, order).with_user_eval("B"));
        }
        let store = CountingStore {
            inner: store,
            category_queries: AtomicUsize::new(0),
        };

        aggregate(&store, user_id, Visibility::Full).await.unwrap();
        assert_eq!(store.category_queries.load(Ordering::SeqCst), 1);
    }
}
