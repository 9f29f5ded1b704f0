//! Tile resolution against the registered device families.

use crate::components::{ComponentsState, Tile};
use crate::project::{AppType, ProjectConfig, TileDeclaration};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolve the project's tile declarations against the registered families.
///
/// Tiles only exist for applications with a native device bundle. A tile
/// that matches no registered family is dropped, and `None` is returned
/// when no tile survives so the manifest omits the field entirely.
pub fn map_tiles(project: &ProjectConfig, components: &ComponentsState) -> Option<Vec<Tile>> {
    if project.app_type != AppType::Application || !components.has_native {
        return None;
    }

    let tiles: Vec<Tile> = project
        .tiles
        .iter()
        .filter_map(|declaration| resolve_tile(declaration, components))
        .collect();

    (!tiles.is_empty()).then_some(tiles)
}

fn resolve_tile(declaration: &TileDeclaration, components: &ComponentsState) -> Option<Tile> {
    let platforms: Vec<String> = match &declaration.build_targets {
        Some(targets) => {
            let mut platforms: Vec<String> = Vec::with_capacity(targets.len());
            for target in targets {
                if components.watch.contains_key(target) && !platforms.contains(target) {
                    platforms.push(target.clone());
                }
            }
            platforms
        }
        None => components.families().map(str::to_string).collect(),
    };

    if platforms.is_empty() {
        tracing::debug!(tile = %declaration.id, "tile matches no registered family, dropped");
        return None;
    }

    Some(Tile {
        id: declaration.id.clone(),
        name: declaration.name.clone(),
        platforms,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
