//! Shared reference index fixture for the integration tests.

use std::fs;
use std::path::Path;

pub const NCBI_NODES: &str = "\
9606\tHomo sapiens\thuman\tspecies\t9606|9605|9604|9443|40674|7711|33208|2759|131567|1\t8|7|6|5|4|3|2|0|0
9605\tHomo\t\tgenus\t9605|9604|9443|40674|7711|33208|2759|131567|1\t7|6|5|4|3|2|0|0
9604\tHominidae\t\tfamily\t9604|9443|40674|7711|33208|2759|131567|1\t6|5|4|3|2|0|0
562\tEscherichia coli\t\tspecies\t562|561|543|91347|1236|1224|2|131567|1\t8|7|6|5|4|3|1|0
561\tEscherichia\t\tgenus\t561|543|91347|1236|1224|2|131567|1\t7|6|5|4|3|1|0
";

pub const NCBI_GENERA: &str = "\
0\tHomo\t9605|9606
1\tEscherichia\t561|562
";

pub const GBIF_NODES: &str = "\
2436436\tHomo sapiens\t\tspecies\t2436436|2436435|5483|1\t8|7|6
2436435\tHomo\t\tgenus\t2436435|5483|1\t7|6
";

pub const GBIF_GENERA: &str = "0\tHomo\t2436435|2436436\n";

/// Write the ncbi and gbif fixture files into `dir`
pub fn write_index(dir: &Path) {
    fs::write(dir.join("ncbi_node_dict.txt"), NCBI_NODES).unwrap();
    fs::write(dir.join("ncbi_genus_dict.txt"), NCBI_GENERA).unwrap();
    fs::write(dir.join("gbif_node_dict.txt"), GBIF_NODES).unwrap();
    fs::write(dir.join("gbif_genus_dict.txt"), GBIF_GENERA).unwrap();
}
