//! Manager for spawning and routing between multiple table actors.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    TableId,
    actor::{TableActor, TableHandle},
    config::TableConfig,
};
use crate::game::entities::{Chips, PlayerId, SeatIndex};
use crate::game::errors::GameError;

/// Table metadata for discovery.
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub id: TableId,
    pub name: String,
    pub player_count: usize,
    pub max_seats: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
}

/// Spawns table actors and routes players to them. Cheap to clone; all
/// clones share the same table registry.
#[derive(Clone, Default)]
pub struct TableManager {
    tables: Arc<RwLock<HashMap<TableId, (TableConfig, TableHandle)>>>,
}

impl TableManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config, spawn a table actor, and register its handle.
    pub async fn create_table(&self, config: TableConfig) -> Result<TableId, String> {
        config.validate()?;
        let id = Uuid::new_v4();
        let (actor, handle) = TableActor::new(id, config.clone());
        tokio::spawn(actor.run());
        self.tables.write().await.insert(id, (config, handle));
        log::info!("created table {id}");
        Ok(id)
    }

    pub async fn get_handle(&self, id: TableId) -> Option<TableHandle> {
        self.tables
            .read()
            .await
            .get(&id)
            .map(|(_, handle)| handle.clone())
    }

    /// Metadata for every registered table.
    pub async fn list_tables(&self) -> Vec<TableMetadata> {
        let tables = self.tables.read().await;
        let mut out = Vec::with_capacity(tables.len());
        for (id, (config, handle)) in tables.iter() {
            let player_count = match handle.view(None).await {
                Ok(view) => view.players.len(),
                Err(_) => continue,
            };
            out.push(TableMetadata {
                id: *id,
                name: config.name.clone(),
                player_count,
                max_seats: config.max_seats,
                small_blind: config.small_blind,
                big_blind: config.big_blind,
            });
        }
        out
    }

    /// Seat a player at a specific table, using the table's configured
    /// buy-in.
    pub async fn join_table(
        &self,
        id: TableId,
        player: PlayerId,
    ) -> Result<SeatIndex, GameError> {
        let (buy_in, handle) = {
            let tables = self.tables.read().await;
            let (config, handle) = tables.get(&id).ok_or(GameError::TableClosed)?;
            (config.buy_in, handle.clone())
        };
        handle.join(player, buy_in).await
    }

    /// Seat a player at the first table with an open seat.
    pub async fn join_any(&self, player: PlayerId) -> Result<(TableId, SeatIndex), GameError> {
        let candidates: Vec<(TableId, Chips, TableHandle)> = {
            let tables = self.tables.read().await;
            tables
                .iter()
                .map(|(id, (config, handle))| (*id, config.buy_in, handle.clone()))
                .collect()
        };
        for (id, buy_in, handle) in candidates {
            if !handle.available_to_join().await {
                continue;
            }
            match handle.join(player.clone(), buy_in).await {
                Ok(seat) => return Ok((id, seat)),
                Err(GameError::TableFull | GameError::GameInProgress | GameError::TableClosed) => {
                    continue;
                }
                Err(other) => return Err(other),
            }
        }
        Err(GameError::TableFull)
    }

    /// Close a table and drop it from the registry.
    pub async fn close_table(&self, id: TableId) -> Result<(), GameError> {
        let removed = self.tables.write().await.remove(&id);
        match removed {
            Some((_, handle)) => handle.close().await,
            None => Err(GameError::TableClosed),
        }
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }
}
