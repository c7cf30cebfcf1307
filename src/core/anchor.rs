//! Benutzer-Ankerpunkte des Kurven-Designers.

use glam::DVec2;

/// Vom Benutzer gesetzter Punkt in der Designer-Ebene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    /// Stabile ID (bleibt bei Drag erhalten)
    pub id: u64,
    /// Position: `x` = Tiefe, `y` = Höhe
    pub position: DVec2,
}

impl AnchorPoint {
    pub fn new(id: u64, position: DVec2) -> Self {
        Self { id, position }
    }
}

/// Nach Höhe sortierte Ankerliste mit fortlaufender ID-Vergabe.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    anchors: Vec<AnchorPoint>,
    next_id: u64,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self {
            anchors: Vec::new(),
            next_id: 1,
        }
    }

    /// Fügt einen Anker ein und gibt seine neue ID zurück.
    pub fn add(&mut self, position: DVec2) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.anchors.push(AnchorPoint::new(id, position));
        self.sort();
        id
    }

    /// Verschiebt einen Anker. `false` wenn die ID unbekannt ist.
    pub fn move_to(&mut self, id: u64, position: DVec2) -> bool {
        let Some(anchor) = self.anchors.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        anchor.position = position;
        self.sort();
        true
    }

    /// Entfernt einen Anker. `false` wenn die ID unbekannt ist.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.anchors.len();
        self.anchors.retain(|a| a.id != id);
        self.anchors.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&AnchorPoint> {
        self.anchors.iter().find(|a| a.id == id)
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Anker in Höhenreihenfolge.
    pub fn as_slice(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    /// Positionen in Höhenreihenfolge.
    pub fn positions(&self) -> Vec<DVec2> {
        self.anchors.iter().map(|a| a.position).collect()
    }

    /// Sortiert nach Höhe; bei Gleichstand entscheidet die ID (deterministisch).
    fn sort(&mut self) {
        self.anchors.sort_by(|l, r| {
            l.position
                .y
                .total_cmp(&r.position.y)
                .then(l.id.cmp(&r.id))
        });
    }
}
