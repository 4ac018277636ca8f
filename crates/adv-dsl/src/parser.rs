//! Line-oriented parser for `.world` files.
//!
//! A world file is a sequence of `[TYPE]` / `[TYPE:id]` section headers, each
//! followed by `key: value` properties. Rooms and items are committed to the
//! [`World`] when their section ends. Cross references (exits, locks, item
//! locations, the start room) are resolved in a second pass once the whole
//! file has been read, so sections may refer to ones defined later.

use std::mem;
use std::ops::Range;

use adv_core::{
    ConditionKind, ConditionalDescription, Direction, Item, ItemId, Limits, Room, RoomId, World,
};

use crate::diagnostics::Diagnostic;
use crate::error::{LoadError, LoadResult};

/// World name used when the file has no `name` property.
pub const DEFAULT_WORLD_NAME: &str = "Untitled";

/// A successfully parsed world and the warnings produced along the way.
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    pub world: World,
    /// Display name from the `[WORLD]` section.
    pub name: String,
    pub warnings: Vec<Diagnostic>,
}

/// Parse world file source with the given capacity limits.
pub fn parse(source: &str, limits: Limits) -> LoadResult<LoadedWorld> {
    let lines = split_lines(source);
    let mut parser = Parser::new(limits);
    let mut section: Option<Section> = None;

    for line in &lines {
        if line.text.is_empty() || line.text.starts_with('#') {
            continue;
        }

        if line.text.starts_with('[') {
            if let Some(done) = section.take() {
                parser.commit(done, line)?;
            }
            section = Some(parse_header(line)?);
            continue;
        }

        let (key, value) = split_property(line)?;
        match section.as_mut() {
            Some(current) => parser.property(current, key, value, line),
            None => {
                return Err(LoadError::new(
                    line.number,
                    line.span.clone(),
                    "Property outside of any section",
                ));
            }
        }
    }

    // A section still open at end of file is committed against the last line.
    if let Some(done) = section.take() {
        let last = lines.last().cloned().unwrap_or(Line {
            number: 0,
            span: 0..0,
            text: "",
        });
        parser.commit(done, &last)?;
    }

    parser.finish()
}

/// Parse the body of a `description_if(...)` key into a rule condition.
///
/// Returns the condition and whether it is negated, or `None` if the key is
/// malformed or names an unknown condition.
pub fn parse_condition(key: &str) -> Option<(ConditionKind, bool)> {
    let inner = key
        .strip_prefix("description_if(")?
        .strip_suffix(')')?
        .trim();

    let (negate, cond) = match inner.strip_prefix('!') {
        Some(rest) => (true, rest.trim()),
        None => (false, inner),
    };

    let kind = match cond.split_once('=') {
        None => match cond {
            "first_visit" => ConditionKind::FirstVisit,
            "visited" => ConditionKind::Visited,
            _ => return None,
        },
        Some((name, subject)) => {
            let subject = subject.trim();
            if subject.is_empty() {
                return None;
            }
            let subject = subject.to_string();
            match name.trim() {
                "has_item" => ConditionKind::HasItem(subject),
                "room_has_item" => ConditionKind::RoomHasItem(subject),
                "item_used" => ConditionKind::ItemUsed(subject),
                _ => return None,
            }
        }
    };

    Some((kind, negate))
}

/// Boolean property keywords: `yes`, `true` and `1` are true.
fn parse_bool(value: &str) -> bool {
    matches!(value, "yes" | "true" | "1")
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Line<'a> {
    number: usize,
    /// Span of the trimmed text.
    span: Range<usize>,
    text: &'a str,
}

fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    let mut lines = Vec::new();

    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let content = raw.trim_end_matches(['\n', '\r']);
        let lead = content.len() - content.trim_start().len();
        let text = content.trim();
        let start = offset + lead;
        lines.push(Line {
            number: idx + 1,
            span: start..start + text.len(),
            text,
        });
        offset += raw.len();
    }

    lines
}

fn split_property<'a>(line: &Line<'a>) -> LoadResult<(&'a str, &'a str)> {
    let invalid = || LoadError::new(line.number, line.span.clone(), "Invalid property line");

    let (key, value) = line.text.split_once(':').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }
    Ok((key, value.trim()))
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Located {
    value: String,
    line: usize,
    span: Range<usize>,
}

impl Located {
    fn new(value: &str, line: &Line<'_>) -> Self {
        Self {
            value: value.to_string(),
            line: line.number,
            span: line.span.clone(),
        }
    }
}

#[derive(Debug)]
enum Section {
    World,
    Room(RoomDraft),
    Item(ItemDraft),
}

#[derive(Debug, Default)]
struct RoomDraft {
    id: String,
    name: String,
    description: String,
    exits: Option<Located>,
    locked_exits: Option<Located>,
    conditionals: Vec<ConditionalDescription>,
}

#[derive(Debug, Default)]
struct ItemDraft {
    id: String,
    header_line: usize,
    header_span: Range<usize>,
    name: String,
    description: String,
    location: String,
    takeable: bool,
    use_message: String,
    use_consumable: bool,
}

fn parse_header(line: &Line<'_>) -> LoadResult<Section> {
    let error = |message: String| LoadError::new(line.number, line.span.clone(), message);

    let inner = line
        .text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| error("Invalid section header".to_string()))?;

    let (kind, id) = match inner.split_once(':') {
        Some((kind, id)) => (kind.trim(), Some(id.trim())),
        None => (inner.trim(), None),
    };

    match (kind, id) {
        ("WORLD", _) => Ok(Section::World),
        ("ROOM", Some(id)) if !id.is_empty() => Ok(Section::Room(RoomDraft {
            id: id.to_string(),
            ..RoomDraft::default()
        })),
        ("ITEM", Some(id)) if !id.is_empty() => Ok(Section::Item(ItemDraft {
            id: id.to_string(),
            header_line: line.number,
            header_span: line.span.clone(),
            ..ItemDraft::default()
        })),
        ("ROOM" | "ITEM", _) => Err(error(format!(
            "Section [{kind}] needs an id, as in [{kind}:some_id]"
        ))),
        _ => Err(error(format!("Unknown section type '{kind}'"))),
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Placement {
    item: ItemId,
    item_id: String,
    room_id: String,
    line: usize,
    span: Range<usize>,
}

struct Parser {
    world: World,
    name: String,
    start: Option<Located>,
    warnings: Vec<Diagnostic>,
    pending_exits: Vec<(RoomId, Located)>,
    pending_locks: Vec<(RoomId, Located)>,
    placements: Vec<Placement>,
}

impl Parser {
    fn new(limits: Limits) -> Self {
        Self {
            world: World::with_limits(DEFAULT_WORLD_NAME, limits),
            name: DEFAULT_WORLD_NAME.to_string(),
            start: None,
            warnings: Vec::new(),
            pending_exits: Vec::new(),
            pending_locks: Vec::new(),
            placements: Vec::new(),
        }
    }

    fn warn(&mut self, line: usize, span: Range<usize>, message: String) {
        tracing::warn!(line, "{message}");
        self.warnings.push(Diagnostic::warning(line, span, message));
    }

    fn property(&mut self, section: &mut Section, key: &str, value: &str, line: &Line<'_>) {
        match section {
            Section::World => match key {
                "name" => self.name = value.to_string(),
                "start" => self.start = Some(Located::new(value, line)),
                _ => self.unknown_key(key, "WORLD", line),
            },
            Section::Room(room) => match key {
                "name" => room.name = value.to_string(),
                "description" => room.description = value.to_string(),
                "exits" => room.exits = Some(Located::new(value, line)),
                "locked_exits" => room.locked_exits = Some(Located::new(value, line)),
                _ if key.starts_with("description_if") => match parse_condition(key) {
                    Some((condition, negate)) => {
                        room.conditionals.push(ConditionalDescription {
                            condition,
                            negate,
                            text: value.to_string(),
                        });
                    }
                    None => self.warn(
                        line.number,
                        line.span.clone(),
                        format!(
                            "Invalid conditional description '{key}' in room '{}'",
                            room.id
                        ),
                    ),
                },
                _ => self.unknown_key(key, "ROOM", line),
            },
            Section::Item(item) => match key {
                "name" => item.name = value.to_string(),
                "description" => item.description = value.to_string(),
                "location" => item.location = value.to_string(),
                "takeable" => item.takeable = parse_bool(value),
                "use_message" => item.use_message = value.to_string(),
                "use_consumable" => item.use_consumable = parse_bool(value),
                _ => self.unknown_key(key, "ITEM", line),
            },
        }
    }

    fn unknown_key(&mut self, key: &str, section: &str, line: &Line<'_>) {
        self.warn(
            line.number,
            line.span.clone(),
            format!("Unknown property '{key}' in [{section}] section"),
        );
    }

    /// Validate a finished section and add it to the world. `line` is the
    /// line that ended the section.
    fn commit(&mut self, section: Section, line: &Line<'_>) -> LoadResult<()> {
        let error = |message: String| LoadError::new(line.number, line.span.clone(), message);

        match section {
            Section::World => Ok(()),
            Section::Room(draft) => {
                let missing = missing_fields(&[
                    ("name", draft.name.as_str()),
                    ("description", draft.description.as_str()),
                ]);
                if !missing.is_empty() {
                    return Err(error(format!(
                        "Room '{}' missing required fields: {missing}",
                        draft.id
                    )));
                }

                let mut room = Room::new(draft.id.clone(), draft.name, draft.description);
                room.conditional_descriptions = draft.conditionals;
                let id = self
                    .world
                    .add_room(room)
                    .map_err(|e| error(format!("Failed to add room '{}': {e}", draft.id)))?;

                if let Some(exits) = draft.exits {
                    self.pending_exits.push((id, exits));
                }
                if let Some(locks) = draft.locked_exits {
                    self.pending_locks.push((id, locks));
                }
                Ok(())
            }
            Section::Item(draft) => {
                let missing = missing_fields(&[
                    ("name", draft.name.as_str()),
                    ("description", draft.description.as_str()),
                    ("location", draft.location.as_str()),
                ]);
                if !missing.is_empty() {
                    return Err(error(format!(
                        "Item '{}' missing required fields: {missing}",
                        draft.id
                    )));
                }

                let item = Item::new(draft.id.clone(), draft.name, draft.description)
                    .with_takeable(draft.takeable)
                    .with_use(draft.use_message, draft.use_consumable);
                let id = self
                    .world
                    .add_item(item)
                    .map_err(|e| error(format!("Failed to add item '{}': {e}", draft.id)))?;

                self.placements.push(Placement {
                    item: id,
                    item_id: draft.id,
                    room_id: draft.location,
                    line: draft.header_line,
                    span: draft.header_span,
                });
                Ok(())
            }
        }
    }

    fn finish(mut self) -> LoadResult<LoadedWorld> {
        if self.world.room_count() == 0 {
            return Err(LoadError::general("No rooms defined in world"));
        }

        self.resolve_placements()?;
        self.resolve_start()?;
        self.resolve_exits();
        self.resolve_locks();

        self.world.name = self.name.clone();
        Ok(LoadedWorld {
            world: self.world,
            name: self.name,
            warnings: self.warnings,
        })
    }

    fn resolve_placements(&mut self) -> LoadResult<()> {
        for placement in mem::take(&mut self.placements) {
            let error =
                |message: String| LoadError::new(placement.line, placement.span.clone(), message);

            let room = self.world.find_room(&placement.room_id).ok_or_else(|| {
                error(format!(
                    "Item '{}' is located in unknown room '{}'",
                    placement.item_id, placement.room_id
                ))
            })?;
            self.world
                .place_item(placement.item, room)
                .map_err(|e| error(format!("Failed to place item '{}': {e}", placement.item_id)))?;
        }
        Ok(())
    }

    fn resolve_start(&mut self) -> LoadResult<()> {
        let first = RoomId(0);
        let start = match self.start.take() {
            Some(start) if !start.value.is_empty() => match self.world.find_room(&start.value) {
                Some(id) => id,
                None => {
                    let fallback = self.room_id_text(first);
                    self.warn(
                        start.line,
                        start.span,
                        format!(
                            "Start room '{}' does not exist, starting in '{fallback}'",
                            start.value
                        ),
                    );
                    first
                }
            },
            _ => first,
        };

        self.world
            .set_start_room(start)
            .and_then(|()| self.world.set_current_room(start))
            .map_err(|e| LoadError::general(e.to_string()))?;
        if let Some(room) = self.world.room_mut(start) {
            room.visited = true;
        }
        Ok(())
    }

    fn resolve_exits(&mut self) {
        for (room, exits) in mem::take(&mut self.pending_exits) {
            let room_id = self.room_id_text(room);
            for token in exits.value.split(',').map(str::trim) {
                if token.is_empty() {
                    continue;
                }
                let Some((dir, target)) = self.direction_pair(&room_id, token, &exits) else {
                    continue;
                };
                match self.world.find_room(target) {
                    Some(to) => {
                        if let Err(e) = self.world.connect(room, dir, to) {
                            self.warn(exits.line, exits.span.clone(), e.to_string());
                        }
                    }
                    None => self.warn(
                        exits.line,
                        exits.span.clone(),
                        format!(
                            "Room '{room_id}' has exit '{dir}' to non-existent room '{target}'"
                        ),
                    ),
                }
            }
        }
    }

    fn resolve_locks(&mut self) {
        for (room, locks) in mem::take(&mut self.pending_locks) {
            let room_id = self.room_id_text(room);
            for token in locks.value.split(',').map(str::trim) {
                if token.is_empty() {
                    continue;
                }
                let Some((dir, key)) = self.direction_pair(&room_id, token, &locks) else {
                    continue;
                };

                // The lock is installed even if the key does not exist.
                if let Some(target) = self.world.room_mut(room) {
                    target.lock_exit(dir, key);
                }
                if self.world.find_item(key).is_none() {
                    self.warn(
                        locks.line,
                        locks.span.clone(),
                        format!(
                            "Room '{room_id}' has locked exit '{dir}' requiring non-existent key '{key}'"
                        ),
                    );
                }
            }
        }
    }

    /// Split a `direction=value` token, warning about malformed ones.
    fn direction_pair<'t>(
        &mut self,
        room_id: &str,
        token: &'t str,
        at: &Located,
    ) -> Option<(Direction, &'t str)> {
        let Some((dir, value)) = token.split_once('=') else {
            self.warn(
                at.line,
                at.span.clone(),
                format!("Room '{room_id}' has malformed exit '{token}', expected direction=id"),
            );
            return None;
        };

        let (dir, value) = (dir.trim(), value.trim());
        let Some(direction) = Direction::parse(dir) else {
            self.warn(
                at.line,
                at.span.clone(),
                format!("Room '{room_id}' has invalid direction '{dir}'"),
            );
            return None;
        };
        if value.is_empty() {
            self.warn(
                at.line,
                at.span.clone(),
                format!("Room '{room_id}' has exit '{direction}' with no target"),
            );
            return None;
        }
        Some((direction, value))
    }

    fn room_id_text(&self, room: RoomId) -> String {
        self.world
            .room(room)
            .map(|r| r.id.clone())
            .unwrap_or_default()
    }
}

fn missing_fields(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
