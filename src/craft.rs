//! recipe lookup and inventory accounting

use std::collections::HashMap;

use thiserror::Error;

/// multiplicity-tagged entity names, in declaration order
pub type IngredientList = Vec<(usize, String)>;

/// What an agent holds, count-addressed. An absent entity counts zero
/// and a zero count is never stored, so equality cannot tell the two
/// apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory(HashMap<String, usize>);

impl Inventory {
    pub fn new() -> Inventory {
        Inventory::default()
    }

    pub fn count(&self, entity: &str) -> usize {
        self.0.get(entity).copied().unwrap_or(0)
    }

    /// adding zero of something is not having it
    pub fn add(&mut self, count: usize, entity: impl Into<String>) {
        if 0 < count {
            *self.0.entry(entity.into()).or_insert(0) += count;
        }
    }

    /// callers check `count` first, going below zero is their bug
    fn deduct(&mut self, count: usize, entity: &str) {
        if 0 == count {
            return;
        }
        let held = self.0.get_mut(entity).expect("deducting an entity not held");
        assert!(count <= *held, "deducting {count} {entity} but holding {held}");
        *held -= count;
        if 0 == *held {
            self.0.remove(entity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(entity, count)| (entity.as_str(), *count))
    }
}

/// input multiplicities to output multiplicities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub inputs: IngredientList,
    pub outputs: IngredientList,
}

/// per-entity shortfall, total required minus held, in recipe input order
#[derive(PartialEq, Eq, Debug, Error)]
#[error("missing ingredients: {}", fmt_counts(.0))]
pub struct MissingIngredients(pub IngredientList);

fn fmt_counts(list: &IngredientList) -> String {
    list.iter()
        .map(|(count, entity)| format!("{count} {entity}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Recipe {
    /// Applies the recipe to the inventory in place: inputs deducted,
    /// outputs added. Rows naming the same entity sum, and every total
    /// is checked before anything is touched, so on a shortfall the
    /// inventory is exactly as it was and the error lists how much of
    /// which entity was short.
    pub fn craft(&self, inventory: &mut Inventory) -> Result<(), MissingIngredients> {
        // the check and the deduction must agree on totals, so duplicate
        // rows sum first; the earliest row keeps the report position
        let mut needed: Vec<(usize, &str)> = Vec::new();
        for (required, entity) in &self.inputs {
            match needed.iter_mut().find(|(_, e)| e == entity) {
                Some((total, _)) => *total += *required,
                None => needed.push((*required, entity.as_str())),
            }
        }

        let missing: IngredientList = needed
            .iter()
            .filter_map(|(required, entity)| {
                let held = inventory.count(entity);
                (held < *required).then(|| (required - held, entity.to_string()))
            })
            .collect();
        if !missing.is_empty() {
            tracing::trace!(?missing, "craft blocked on missing ingredients");
            return Err(MissingIngredients(missing));
        }

        for (required, entity) in needed {
            inventory.deduct(required, entity);
        }
        for (count, entity) in &self.outputs {
            inventory.add(*count, entity.clone());
        }
        tracing::debug!(
            consumed = self.inputs.len(),
            produced = self.outputs.len(),
            "recipe applied"
        );
        Ok(())
    }
}

/// product-name lookup; not knowing a recipe is an answer, not a fault
#[derive(Debug, Clone, Default)]
pub struct RecipeBook(HashMap<String, Recipe>);

impl RecipeBook {
    pub fn new() -> RecipeBook {
        RecipeBook::default()
    }

    pub fn insert(&mut self, product: impl Into<String>, recipe: Recipe) {
        self.0.insert(product.into(), recipe);
    }

    pub fn recipe_for(&self, product: &str) -> Option<&Recipe> {
        self.0.get(product)
    }

    /// the starter book, what a fresh world knows how to make
    pub fn standard() -> RecipeBook {
        fn list(pairs: &[(usize, &str)]) -> IngredientList {
            pairs
                .iter()
                .map(|(count, entity)| (*count, entity.to_string()))
                .collect()
        }

        let mut book = RecipeBook::new();
        book.insert(
            "branch",
            Recipe {
                inputs: list(&[(1, "tree")]),
                outputs: list(&[(2, "branch"), (1, "log")]),
            },
        );
        book.insert(
            "stick",
            Recipe {
                inputs: list(&[(2, "branch")]),
                outputs: list(&[(1, "stick")]),
            },
        );
        book.insert(
            "plank",
            Recipe {
                inputs: list(&[(1, "log")]),
                outputs: list(&[(4, "plank")]),
            },
        );
        book
    }
}

#[test]
fn test() {
    let book = RecipeBook::standard();
    let branches = book.recipe_for("branch").unwrap();

    let mut held = Inventory::new();
    held.add(1, "tree");
    branches.craft(&mut held).unwrap();
    assert_eq!(0, held.count("tree"));
    assert_eq!(2, held.count("branch"));
    assert_eq!(1, held.count("log"));
    let mut all: Vec<_> = held.iter().collect();
    all.sort();
    assert_eq!(vec![("branch", 2), ("log", 1)], all);

    // failing leaves the inventory alone and reports the exact shortfall
    let mut empty = Inventory::new();
    assert_eq!(
        Err(MissingIngredients(vec![(1, "tree".into())])),
        branches.craft(&mut empty)
    );
    assert_eq!(Inventory::new(), empty);

    // the shortfall is required minus held, per entity, in input order
    let mut some = Inventory::new();
    some.add(1, "branch");
    let err = book
        .recipe_for("stick")
        .unwrap()
        .craft(&mut some)
        .unwrap_err();
    assert_eq!(MissingIngredients(vec![(1, "branch".into())]), err);
    assert_eq!("missing ingredients: 1 branch", err.to_string());
    assert_eq!(1, some.count("branch"));

    let fancy = Recipe {
        inputs: vec![(2, "gear".into()), (1, "frame".into())],
        outputs: vec![(1, "clock".into())],
    };
    let mut bits = Inventory::new();
    bits.add(1, "gear");
    assert_eq!(
        Err(MissingIngredients(vec![
            (1, "gear".into()),
            (1, "frame".into()),
        ])),
        fancy.craft(&mut bits)
    );

    // rows naming the same entity sum, for the check and the deduction
    let doubled = Recipe {
        inputs: vec![(2, "wood".into()), (1, "wood".into())],
        outputs: vec![(1, "shelf".into())],
    };
    let mut boards = Inventory::new();
    boards.add(2, "wood");
    assert_eq!(
        Err(MissingIngredients(vec![(1, "wood".into())])),
        doubled.craft(&mut boards)
    );
    assert_eq!(2, boards.count("wood"));
    boards.add(1, "wood");
    doubled.craft(&mut boards).unwrap();
    assert_eq!(0, boards.count("wood"));
    assert_eq!(1, boards.count("shelf"));

    // an unknown product is no recipe, not an error
    assert!(book.recipe_for("anvil").is_none());

    // zero counts and absent keys are the same thing
    let mut a = Inventory::new();
    a.add(3, "rock");
    a.add(0, "dust");
    let mut b = Inventory::new();
    b.add(3, "rock");
    assert_eq!(b, a);
}
