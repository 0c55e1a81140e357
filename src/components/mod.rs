pub mod relations_graph;
