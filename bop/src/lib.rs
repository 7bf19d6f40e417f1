//! Biomes O' Plenty world generation support
//!
//! Bundles the two independent parts of the mod's world generation:
//!
//! * The block query language of [`bop_query`], which the mod's features use
//!   to describe the blocks they generate on.
//! * The method patcher of [`bop_patcher`], which makes the engine generate
//!   amplified terrain for the mod's amplified world type.
//!
//! [`WorldgenSetup`] owns everything that is fixed before the first query is
//! parsed or the first class is loaded.

use std::{borrow::Cow, sync::Arc};

use bop_common::Config;
use bop_error::Result;
use bop_patcher::{AmplifiedHook, ChunkProviderGenerateTransformer, ClassTransformer};
use bop_query::{parse, BlockPosQuery, ParseContext, PredefinedQueries};
use bop_world::{vanilla, BlockRegistry, WorldTypes};
use log::debug;

pub use bop_common as common;
pub use bop_error as error;
pub use bop_patcher as patcher;
pub use bop_query as query;
pub use bop_world as world;

pub struct WorldgenSetup {
    pub config: Config,
    registry: Arc<BlockRegistry>,
    predefined: PredefinedQueries,
    world_types: WorldTypes,
}

impl WorldgenSetup {
    /// Creates a setup with the vanilla and mod blocks, the default predefined
    /// queries and the mod's world types
    pub fn new(config: Config) -> Result<Self> {
        Self::with_registry(config, vanilla::registry())
    }

    pub fn with_registry(config: Config, registry: BlockRegistry) -> Result<Self> {
        let mut world_types = WorldTypes::with_builtins();
        world_types.register_mod_types()?;

        Ok(WorldgenSetup {
            config,
            registry: Arc::new(registry),
            predefined: PredefinedQueries::with_defaults(),
            world_types,
        })
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn predefined(&self) -> &PredefinedQueries {
        &self.predefined
    }

    pub fn world_types(&self) -> &WorldTypes {
        &self.world_types
    }

    fn parse_context(&self) -> ParseContext<'_> {
        ParseContext::new(&self.registry, &self.predefined).with_config(&self.config)
    }

    /// Parses `spec` against the registered blocks and predefined queries
    pub fn parse_query(&self, spec: &str) -> Result<BlockPosQuery> {
        Ok(parse(spec, &self.parse_context())?)
    }

    /// Parses `spec` and makes it available as `@name`
    ///
    /// Returns the query previously registered under `name`.
    pub fn define_query(
        &mut self,
        name: &str,
        spec: &str,
    ) -> Result<Option<Arc<BlockPosQuery>>> {
        let query = self.parse_query(spec)?;
        debug!("Defining @{name} as {spec}");
        Ok(self.predefined.register(name, query))
    }

    pub fn amplified_hook(&self) -> AmplifiedHook {
        AmplifiedHook::new(&self.world_types)
    }

    pub fn transformer(&self) -> ChunkProviderGenerateTransformer {
        ChunkProviderGenerateTransformer::new(&self.config)
    }

    /// Runs every class transformer of the mod over a class that is being loaded
    pub fn transform_class<'a>(
        &self,
        name: &str,
        transformed_name: &str,
        bytes: &'a [u8],
    ) -> Result<Cow<'a, [u8]>> {
        Ok(self.transformer().transform(name, transformed_name, bytes)?)
    }
}
