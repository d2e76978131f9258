pub mod in_memory_transport;
