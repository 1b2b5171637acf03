//! Structural binding of TMX markup onto map records.
//!
//! Only what the loader consumes is bound: map and tile-set attributes, tile
//! terrain assignments, terrain types and tile layers with their `<data>`
//! payload. Object layers, groups and properties are skipped.

use std::str::FromStr;

use roxmltree::{Document, Node};

use crate::codec::{Compression, Encoding, Payload};
use crate::error::{Error, Result};
use crate::state::{Layer, MapDocument, TileImage, TileSet, TileSetEntry};

/// Bind a whole `<map>` document, decoding every tile layer.
pub fn parse_map(text: &str) -> Result<MapDocument> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("map") {
        return Err(Error::Parse(format!(
            "expected <map> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut map = MapDocument::new(attribute(&root, "width")?, attribute(&root, "height")?);
    map.version = root.attribute("version").unwrap_or_default().to_string();
    map.orientation = root.attribute("orientation").unwrap_or_default().to_string();
    map.render_order = root.attribute("renderorder").unwrap_or_default().to_string();
    map.tile_width = attribute_or_default(&root, "tilewidth")?;
    map.tile_height = attribute_or_default(&root, "tileheight")?;

    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "tileset" => map.tilesets.push(parse_tileset(&node)?),
            "layer" => {
                let layer = parse_layer(&node)?;
                if layer.width != map.width || layer.height != map.height {
                    tracing::warn!(
                        layer = %layer.name,
                        layer_width = layer.width,
                        layer_height = layer.height,
                        map_width = map.width,
                        map_height = map.height,
                        "layer dimensions differ from map"
                    );
                }
                map.layers.push(layer);
            }
            _ => {}
        }
    }

    Ok(map)
}

fn parse_tileset(node: &Node) -> Result<TileSet> {
    let mut tileset = TileSet::new(
        attribute(node, "firstgid")?,
        attribute_or_default(node, "tilecount")?,
        attribute_or_default(node, "columns")?,
    );
    tileset.name = node.attribute("name").unwrap_or_default().to_string();
    tileset.tile_width = attribute_or_default(node, "tilewidth")?;
    tileset.tile_height = attribute_or_default(node, "tileheight")?;
    tileset.spacing = attribute_or_default(node, "spacing")?;
    tileset.margin = attribute_or_default(node, "margin")?;

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "image" => {
                tileset.image = Some(TileImage {
                    source: child.attribute("source").unwrap_or_default().to_string(),
                    width: attribute_or_default(&child, "width")?,
                    height: attribute_or_default(&child, "height")?,
                });
            }
            "terraintypes" => {
                for terrain in child.children().filter(|n| n.has_tag_name("terrain")) {
                    let name: String = attribute(&terrain, "name")?;
                    let tile: i64 = attribute_or(&terrain, "tile", -1)?;
                    tileset.add_terrain(name, u32::try_from(tile).ok());
                }
            }
            "tile" => {
                let entry = TileSetEntry::new(
                    attribute(&child, "id")?,
                    child.attribute("terrain").unwrap_or_default(),
                );
                tileset.add_entry(entry);
            }
            _ => {}
        }
    }

    Ok(tileset)
}

fn parse_layer(node: &Node) -> Result<Layer> {
    let name = node.attribute("name").unwrap_or_default();
    let width = attribute(node, "width")?;
    let height = attribute(node, "height")?;

    let data = node
        .children()
        .find(|n| n.has_tag_name("data"))
        .ok_or_else(|| Error::Parse(format!("layer '{name}' has no <data> element")))?;
    let payload = Payload::new(
        data.text().unwrap_or_default(),
        Encoding::from_tag(data.attribute("encoding")),
        Compression::from_tag(data.attribute("compression")),
    );

    Layer::build(name, width, height, payload)
}

fn attribute<T: FromStr>(node: &Node, name: &'static str) -> Result<T> {
    let value = node.attribute(name).ok_or_else(|| Error::MissingAttribute {
        tag: node.tag_name().name().to_string(),
        name,
    })?;
    parse_value(node, name, value)
}

fn attribute_or<T: FromStr>(node: &Node, name: &'static str, fallback: T) -> Result<T> {
    match node.attribute(name) {
        Some(value) => parse_value(node, name, value),
        None => Ok(fallback),
    }
}

fn attribute_or_default<T: FromStr + Default>(node: &Node, name: &'static str) -> Result<T> {
    attribute_or(node, name, T::default())
}

fn parse_value<T: FromStr>(node: &Node, name: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidAttribute {
        tag: node.tag_name().name().to_string(),
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.0" orientation="orthogonal" renderorder="right-down" width="2" height="1" tilewidth="32" tileheight="32">
 <tileset firstgid="1" name="terrain" tilewidth="32" tileheight="32" spacing="1" margin="2" tilecount="4" columns="2">
  <image source="terrain.png" width="64" height="64"/>
  <terraintypes>
   <terrain name="water" tile="0"/>
   <terrain name="sand" tile="-1"/>
  </terraintypes>
  <tile id="0" terrain="0,0,0,0"/>
  <tile id="1" terrain="0,1,0,1"/>
 </tileset>
 <layer name="ground" width="2" height="1">
  <data encoding="base64">
   AQAAAAAAAIA=
  </data>
 </layer>
 <objectgroup name="spawns"/>
</map>
"#;

    #[test]
    fn test_parse_small_map() {
        let map = parse_map(SMALL_MAP).unwrap();
        assert_eq!((map.width, map.height), (2, 1));
        assert_eq!(map.version, "1.0");
        assert_eq!(map.orientation, "orthogonal");
        assert_eq!(map.render_order, "right-down");
        assert_eq!((map.tile_width, map.tile_height), (32, 32));

        let tileset = &map.tilesets[0];
        assert_eq!(tileset.first_gid, 1);
        assert_eq!(tileset.name, "terrain");
        assert_eq!((tileset.spacing, tileset.margin), (1, 2));
        assert_eq!((tileset.tile_count, tileset.columns), (4, 2));
        let image = tileset.image.as_ref().unwrap();
        assert_eq!(image.source, "terrain.png");
        assert_eq!((image.width, image.height), (64, 64));
        assert_eq!(tileset.terrain_types.len(), 2);
        assert_eq!(tileset.terrain_types[0].tile, Some(0));
        assert_eq!(tileset.terrain_types[1].tile, None);
        assert_eq!(tileset.tiles.len(), 2);
        assert_eq!(tileset.tiles[&1].terrain, "0,1,0,1");

        assert_eq!(map.layers.len(), 1);
        assert_eq!(map.layers[0].name, "ground");
        // Second record carries the horizontal flip flag
        assert_eq!(map.layers[0].cells(), &[1, 0]);
    }

    #[test]
    fn test_missing_attribute() {
        let err = parse_map(r#"<map width="2"/>"#).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { name: "height", .. }));
    }

    #[test]
    fn test_invalid_attribute() {
        let err = parse_map(r#"<map width="two" height="1"/>"#).unwrap_err();
        match err {
            Error::InvalidAttribute { tag, name, value } => {
                assert_eq!(tag, "map");
                assert_eq!(name, "width");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_markup() {
        assert!(matches!(parse_map("<map width=\"1\""), Err(Error::Parse(_))));
        assert!(matches!(parse_map("<tileset firstgid=\"1\"/>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_layer_without_data() {
        let text = r#"<map width="1" height="1"><layer name="x" width="1" height="1"/></map>"#;
        let err = parse_map(text).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_bad_layer_fails_whole_map() {
        let text = r#"<map width="1" height="1">
 <layer name="ok" width="1" height="1"><data encoding="base64">AQAAAA==</data></layer>
 <layer name="bad" width="1" height="1"><data encoding="base64" compression="zlib">AQAAAA==</data></layer>
</map>"#;
        match parse_map(text).unwrap_err() {
            Error::Decode { layer, .. } => assert_eq!(layer, "bad"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
