use uuid::Uuid;

use crate::models::quote::Quote;

use super::{MemoryTable, RepositoryResult};

/// Almacenamiento de presupuestos
pub trait QuoteRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Quote>>;

    fn find_by_registration(&self, registration: &str) -> RepositoryResult<Vec<Quote>>;

    fn list(&self) -> RepositoryResult<Vec<Quote>>;

    fn save(&self, quote: &Quote) -> RepositoryResult<()>;
}

pub struct InMemoryQuoteRepository {
    table: MemoryTable<Quote>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("quotes"),
        }
    }
}

impl Default for InMemoryQuoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Quote>> {
        self.table.get(id)
    }

    fn find_by_registration(&self, registration: &str) -> RepositoryResult<Vec<Quote>> {
        let mut quotes = self.table.find(|q| q.registration == registration)?;
        quotes.sort_by_key(|q| q.created_on);
        Ok(quotes)
    }

    fn list(&self) -> RepositoryResult<Vec<Quote>> {
        let mut quotes = self.table.find(|_| true)?;
        quotes.sort_by_key(|q| q.created_on);
        Ok(quotes)
    }

    fn save(&self, quote: &Quote) -> RepositoryResult<()> {
        self.table.upsert(quote.id, quote.clone())
    }
}
