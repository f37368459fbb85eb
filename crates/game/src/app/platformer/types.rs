/// One grid cell: an optional sprite plus an optional world-space collision
/// rectangle. Both absent means empty space. Cells are replaced wholesale,
/// never partially mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tile {
    sprite: Option<&'static str>,
    collider: Option<RectPx>,
}

impl Tile {
    pub(crate) fn sprite_only(key: &'static str) -> Self {
        Self {
            sprite: Some(key),
            collider: None,
        }
    }

    pub(crate) fn solid(key: &'static str, collider: RectPx) -> Self {
        Self {
            sprite: Some(key),
            collider: Some(collider),
        }
    }

    pub(crate) fn collider_only(collider: RectPx) -> Self {
        Self {
            sprite: None,
            collider: Some(collider),
        }
    }

    pub(crate) fn sprite(&self) -> Option<&'static str> {
        self.sprite
    }

    pub(crate) fn collider(&self) -> Option<RectPx> {
        self.collider
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LevelDocument {
    length: u32,
    level: LevelSection,
}

impl LevelDocument {
    pub(crate) fn length(&self) -> u32 {
        self.length
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LevelSection {
    layers: LayerSection,
    objects: ObjectSection,
    #[serde(default)]
    entities: Option<EntitySection>,
}

#[derive(Debug, Clone, Deserialize)]
struct LayerSection {
    sky: LayerRange,
    ground: LayerRange,
}

/// Half-open `[start, end)` coordinate ranges, as authored in level files.
#[derive(Debug, Clone, Deserialize)]
struct LayerRange {
    x: (i32, i32),
    y: (i32, i32),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ObjectSection {
    #[serde(default)]
    bush: Vec<(i32, i32)>,
    #[serde(default)]
    cloud: Vec<(i32, i32)>,
    #[serde(default)]
    pipe: Vec<(i32, i32, i32)>,
    #[serde(default)]
    sky: Vec<(i32, i32)>,
    #[serde(default)]
    ground: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EntitySection {
    #[serde(default, rename = "CoinBox")]
    coin_box: Vec<(i32, i32)>,
    #[serde(default, rename = "Goomba")]
    goomba: Vec<(i32, i32)>,
    #[serde(default, rename = "Koopa")]
    koopa: Vec<(i32, i32)>,
    #[serde(default)]
    coin: Vec<(i32, i32)>,
    #[serde(default, rename = "coinBrick")]
    coin_brick: Vec<(i32, i32)>,
    #[serde(default, rename = "RandomBox")]
    random_box: Vec<(i32, i32, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct QuizQuestion {
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    answer: usize,
}

/// The quiz bank: a finite ordered sequence of questions, consumed front to
/// back through a shared cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuizBank {
    questions: Vec<QuizQuestion>,
}

impl QuizBank {
    pub(crate) fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub(crate) fn len(&self) -> usize {
        self.questions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub(crate) fn question(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }
}

/// Session-wide question cursor. Owned by the scene and passed by reference
/// into the quiz component; it survives level restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QuizProgress {
    next_unseen: usize,
}

impl QuizProgress {
    pub(crate) fn next_unseen(&self) -> usize {
        self.next_unseen
    }

    pub(crate) fn has_unseen(&self, bank: &QuizBank) -> bool {
        self.next_unseen < bank.len()
    }

    pub(crate) fn advance(&mut self) {
        self.next_unseen = self.next_unseen.saturating_add(1);
    }

    pub(crate) fn questions_answered(&self) -> usize {
        self.next_unseen
    }
}

pub(crate) fn load_level_document(path: &Path) -> Result<LevelDocument, String> {
    parse_json_file(path)
}

pub(crate) fn load_quiz_bank(path: &Path) -> Result<QuizBank, String> {
    let questions: Vec<QuizQuestion> = parse_json_file(path)?;
    Ok(QuizBank::new(questions))
}

fn parse_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;
    parse_json_str(&raw).map_err(|error| format!("failed to parse {}: {error}", path.display()))
}

fn parse_json_str<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| error.to_string())
}
