//! Helpers for reporting many errors at once, rather than stopping at the first.

pub trait CollectResults {
    type Item;
    type Err;

    /// Collects every item if all are `Ok`, otherwise every error.
    fn collect_results(self) -> Result<Vec<Self::Item>, Vec<Self::Err>>;
}

impl<Iter, Item, Err> CollectResults for Iter
where
    Iter: IntoIterator<Item = Result<Item, Err>>,
{
    type Item = Item;
    type Err = Err;

    fn collect_results(self) -> Result<Vec<Self::Item>, Vec<Self::Err>> {
        let mut items = Vec::new();
        let mut errs = Vec::new();
        for res in self {
            match res {
                Ok(item) => items.push(item),
                Err(err) => errs.push(err),
            }
        }

        if !errs.is_empty() {
            return Err(errs);
        }

        Ok(items)
    }
}
