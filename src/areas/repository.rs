use crate::areas::config::RepositoryConfig;
use crate::areas::database::Database;
use crate::areas::index::Index;
use std::cell::{RefCell, RefMut};

pub struct Repository {
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
}

impl Repository {
    pub fn new(config: RepositoryConfig, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !config.git_dir().is_dir() {
            return Err(anyhow::anyhow!(
                "Not a git directory: {}",
                config.git_dir().display()
            ));
        }

        let index = Index::new(
            config.index_path().into_boxed_path(),
            *config.index_options(),
        );
        let database = Database::new(config.objects_path().into_boxed_path());

        Ok(Repository {
            config,
            writer: RefCell::new(writer),
            index,
            database,
        })
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}
