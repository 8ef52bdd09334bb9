// service.rs - Request/response shapes of the remote maze and path-finding service

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ValidationError};
use crate::grid::{Grid, Position};

/// The service refuses anything smaller than this in either dimension.
pub const MIN_MAZE_SIDE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeAlgorithm {
    #[default]
    Backtracking,
    Prim,
    Kruskal,
    Eller,
    Wilson,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 5] = [
        MazeAlgorithm::Backtracking,
        MazeAlgorithm::Prim,
        MazeAlgorithm::Kruskal,
        MazeAlgorithm::Eller,
        MazeAlgorithm::Wilson,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MazeAlgorithm::Backtracking => "Recursive Backtracking",
            MazeAlgorithm::Prim => "Prim's",
            MazeAlgorithm::Kruskal => "Kruskal's",
            MazeAlgorithm::Eller => "Eller's",
            MazeAlgorithm::Wilson => "Wilson's",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeType {
    #[default]
    Perfect,
    Loop,
    Braid,
}

impl MazeType {
    pub const ALL: [MazeType; 3] = [MazeType::Perfect, MazeType::Loop, MazeType::Braid];

    pub fn label(self) -> &'static str {
        match self {
            MazeType::Perfect => "Perfect",
            MazeType::Loop => "With loops",
            MazeType::Braid => "Braid (no dead ends)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    #[default]
    #[serde(rename = "astar")]
    AStar,
    Dijkstra,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
        PathAlgorithm::AStar,
        PathAlgorithm::Dijkstra,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "Breadth-First Search",
            PathAlgorithm::Dfs => "Depth-First Search",
            PathAlgorithm::AStar => "A* Search",
            PathAlgorithm::Dijkstra => "Dijkstra's",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRequest {
    pub rows: usize,
    pub cols: usize,
    pub algorithm: MazeAlgorithm,
    pub maze_type: MazeType,
}

impl MazeRequest {
    pub fn new(
        rows: usize,
        cols: usize,
        algorithm: MazeAlgorithm,
        maze_type: MazeType,
    ) -> Result<Self, ValidationError> {
        if rows < MIN_MAZE_SIDE || cols < MIN_MAZE_SIDE {
            return Err(ValidationError::MazeTooSmall {
                rows,
                cols,
                min: MIN_MAZE_SIDE,
            });
        }
        Ok(Self {
            rows,
            cols,
            algorithm,
            maze_type,
        })
    }
}

/// `maze` is the finished maze (after loop/braid post-processing); `steps`
/// are the carving snapshots in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeResponse {
    pub maze: Grid,
    pub steps: Vec<Grid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub maze: Grid,
    pub start: Position,
    pub end: Position,
    pub algorithm: PathAlgorithm,
}

/// An empty `path` means the search finished without reaching the end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathResponse {
    pub visited: Vec<Position>,
    pub path: Vec<Position>,
}

/// Remote algorithm provider. Transport is up to the implementor.
pub trait AlgorithmService: Send + Sync {
    fn generate_maze(
        &self,
        request: MazeRequest,
    ) -> impl Future<Output = Result<MazeResponse, ServiceError>> + Send;

    fn find_path(
        &self,
        request: PathRequest,
    ) -> impl Future<Output = Result<PathResponse, ServiceError>> + Send;
}

impl<T: AlgorithmService> AlgorithmService for Arc<T> {
    fn generate_maze(
        &self,
        request: MazeRequest,
    ) -> impl Future<Output = Result<MazeResponse, ServiceError>> + Send {
        T::generate_maze(self, request)
    }

    fn find_path(
        &self,
        request: PathRequest,
    ) -> impl Future<Output = Result<PathResponse, ServiceError>> + Send {
        T::find_path(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_service_field_names() {
        let request =
            MazeRequest::new(30, 30, MazeAlgorithm::Kruskal, MazeType::Braid).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rows": 30,
                "cols": 30,
                "algorithm": "kruskal",
                "maze_type": "braid",
            })
        );
    }

    #[test]
    fn astar_wire_name_has_no_separator() {
        let json = serde_json::to_string(&PathAlgorithm::AStar).unwrap();
        assert_eq!(json, "\"astar\"");
    }

    #[test]
    fn tiny_mazes_are_refused_locally() {
        let err = MazeRequest::new(4, 30, MazeAlgorithm::Prim, MazeType::Perfect).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MazeTooSmall {
                rows: 4,
                cols: 30,
                min: 5
            }
        );
    }

    #[test]
    fn path_response_decodes_cells() {
        let response: PathResponse = serde_json::from_str(
            r#"{"visited":[{"row":0,"col":1},{"row":1,"col":1}],"path":[]}"#,
        )
        .unwrap();
        assert_eq!(response.visited[1], Position::new(1, 1));
        assert!(response.path.is_empty());
    }
}
