//! Visibility filtering of the export tree

use eval_model::{CategoryNode, ExportTree, Visibility};

/// Prune the tree down to what the visibility mode allows.
///
/// Two stages, both order-preserving:
/// 1. categories that fail the mode's predicate are removed;
/// 2. phases left with no categories are removed entirely — a phase
///    with nothing visible must not appear as an empty section.
///
/// Under `Full` this is the identity. Pure and infallible; the tree is
/// request-owned, so it is taken by value.
pub fn filter_tree(mut tree: ExportTree, visibility: Visibility) -> ExportTree {
    if visibility == Visibility::Full {
        return tree;
    }

    for phase in &mut tree.phases {
        phase.categories.retain(|c| keep_category(c, visibility));
    }
    tree.phases.retain(|p| !p.categories.is_empty());
    tree
}

/// Whether one category survives the given mode.
///
/// For `SelfOnly` the grade query already restricts to non-null
/// self-evaluations, so after a correct merge this re-check cannot fail;
/// it stays because an orphaned grade reference leaves its category
/// unannotated, and that category must not leak through. Same for
/// `ValidatorOnly`.
fn keep_category(category: &CategoryNode, visibility: Visibility) -> bool {
    match visibility {
        Visibility::Full => true,
        Visibility::SelfOnly => category.user_eval.is_some(),
        Visibility::ValidatorOnly => category.validator_eval.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_model::{CategoryId, PhaseNode};

    fn category(title: &str, user_eval: Option<&str>, validator_eval: Option<&str>) -> CategoryNode {
        CategoryNode {
            id: CategoryId::new(),
            title: title.to_string(),
            skills: vec![],
            user_eval: user_eval.map(String::from),
            validator_eval: validator_eval.map(String::from),
        }
    }

    fn sample_tree() -> ExportTree {
        ExportTree {
            phases: vec![
                PhaseNode {
                    title: "Core".to_string(),
                    categories: vec![
                        category("Self-evaluated", Some("B"), None),
                        category("Validated", None, Some("A")),
                        category("Both", Some("C"), Some("C")),
                    ],
                },
                PhaseNode {
                    title: "Advanced".to_string(),
                    categories: vec![category("Ungraded", None, None)],
                },
            ],
        }
    }

    #[test]
    fn test_full_mode_is_identity() {
        let tree = sample_tree();
        let filtered = filter_tree(tree.clone(), Visibility::Full);
        assert_eq!(filtered, tree);
    }

    #[test]
    fn test_self_mode_keeps_user_evaluated_categories() {
        let filtered = filter_tree(sample_tree(), Visibility::SelfOnly);
        assert_eq!(filtered.phases.len(), 1);
        let titles: Vec<&str> = filtered.phases[0]
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Self-evaluated", "Both"]);
    }

    #[test]
    fn test_validator_mode_keeps_validated_categories() {
        let filtered = filter_tree(sample_tree(), Visibility::ValidatorOnly);
        assert_eq!(filtered.phases.len(), 1);
        let titles: Vec<&str> = filtered.phases[0]
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Validated", "Both"]);
    }

    #[test]
    fn test_emptied_phase_is_dropped() {
        // "Advanced" has only an ungraded category; it must disappear
        // entirely rather than render as an empty section
        let filtered = filter_tree(sample_tree(), Visibility::SelfOnly);
        assert!(filtered.phases.iter().all(|p| p.title != "Advanced"));
    }

    #[test]
    fn test_order_preserved() {
        let mut tree = sample_tree();
        tree.phases.push(PhaseNode {
            title: "Extra".to_string(),
            categories: vec![category("Late", Some("D"), None)],
        });

        let filtered = filter_tree(tree, Visibility::SelfOnly);
        let phase_titles: Vec<&str> =
            filtered.phases.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(phase_titles, vec!["Core", "Extra"]);
    }

    #[test]
    fn test_unannotated_category_never_leaks_through() {
        // An orphaned grade reference leaves its category unannotated
        // even though the query restricted to self-evaluated records;
        // the filter's own predicate must still drop it
        let tree = ExportTree {
            phases: vec![PhaseNode {
                title: "Core".to_string(),
                categories: vec![category("Orphan", None, None)],
            }],
        };
        let filtered = filter_tree(tree, Visibility::SelfOnly);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_of_empty_tree() {
        assert!(filter_tree(ExportTree::empty(), Visibility::ValidatorOnly).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_category() -> impl Strategy<Value = CategoryNode> {
            (
                "[a-z]{1,12}",
                prop::option::of("[A-F]"),
                prop::option::of("[A-F]"),
            )
                .prop_map(|(title, user_eval, validator_eval)| CategoryNode {
                    id: CategoryId::new(),
                    title,
                    skills: vec![],
                    user_eval,
                    validator_eval,
                })
        }

        fn arb_tree() -> impl Strategy<Value = ExportTree> {
            prop::collection::vec(
                ("[a-z]{1,12}", prop::collection::vec(arb_category(), 0..6)),
                0..5,
            )
            .prop_map(|phases| ExportTree {
                phases: phases
                    .into_iter()
                    .map(|(title, categories)| PhaseNode { title, categories })
                    .collect(),
            })
        }

        proptest! {
            #[test]
            fn survivors_satisfy_the_mode_predicate(tree in arb_tree()) {
                for visibility in [Visibility::SelfOnly, Visibility::ValidatorOnly] {
                    let filtered = filter_tree(tree.clone(), visibility);
                    for phase in &filtered.phases {
                        prop_assert!(!phase.categories.is_empty());
                        for category in &phase.categories {
                            prop_assert!(keep_category(category, visibility));
                        }
                    }
                }
            }

            #[test]
            fn full_mode_never_changes_the_tree(tree in arb_tree()) {
                let filtered = filter_tree(tree.clone(), Visibility::Full);
                prop_assert_eq!(filtered, tree);
            }

            #[test]
            fn filtering_is_idempotent(tree in arb_tree()) {
                for visibility in [Visibility::SelfOnly, Visibility::ValidatorOnly] {
                    let once = filter_tree(tree.clone(), visibility);
                    let twice = filter_tree(once.clone(), visibility);
                    prop_assert_eq!(twice, once);
                }
            }
        }
    }
}
