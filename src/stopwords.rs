//! English stopword list
//!
//! Function words and filler that make poor seeds. Matching is exact on
//! lowercased tokens, contractions included.

/// Sorted, lowercase English stopwords
pub const ENGLISH: &[&str] = &[
    "a", "able", "about", "above", "abst", "accordance", "according", "accordingly", "across",
    "act", "actually", "added", "adj", "affected", "affecting", "affects", "after", "afterwards",
    "again", "against", "ah", "ain't", "all", "allow", "allows", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "amongst", "amoungst", "amount", "an",
    "and", "announce", "another", "any", "anybody", "anyhow", "anymore", "anyone", "anything",
    "anyway", "anyways", "anywhere", "apart", "apparently", "appear", "appreciate", "appropriate",
    "approximately", "are", "aren", "aren't", "arent", "arise", "around", "as", "aside", "ask",
    "asking", "associated", "at", "auth", "available", "away", "awfully", "b", "back", "be",
    "became", "because", "become", "becomes", "becoming", "been", "before", "beforehand", "begin",
    "beginning", "beginnings", "begins", "behind", "being", "believe", "below", "beside", "besides",
    "best", "better", "between", "beyond", "both", "bottom", "brief", "briefly", "but", "by", "c",
    "c'mon", "c's", "ca", "call", "came", "can", "can't", "cannot", "cant", "cause", "causes",
    "certain", "certainly", "changes", "clearly", "co", "com", "come", "comes", "con", "concerning",
    "consequently", "consider", "considering", "contain", "containing", "contains", "corresponding",
    "could", "couldn", "couldn't", "couldnt", "course", "currently", "d", "de", "definitely",
    "describe", "described", "despite", "did", "didn", "didn't", "different", "do", "does", "doesn",
    "doesn't", "doing", "don", "don't", "done", "down", "downwards", "due", "during", "e", "each",
    "ed", "edu", "effect", "eg", "eight", "eighty", "either", "eleven", "else", "elsewhere",
    "empty", "end", "ending", "enough", "entirely", "especially", "et", "etc", "even", "ever",
    "every", "everybody", "everyone", "everything", "everywhere", "ex", "exactly", "example",
    "except", "f", "far", "few", "ff", "fifteen", "fifth", "fify", "fill", "find", "first", "five",
    "fix", "followed", "following", "follows", "for", "former", "formerly", "forth", "forty",
    "found", "four", "from", "front", "full", "further", "furthermore", "g", "gave", "get", "gets",
    "getting", "give", "given", "gives", "giving", "go", "goes", "going", "gone", "got", "gotten",
    "greetings", "h", "had", "hadn", "hadn't", "happens", "hardly", "has", "hasn", "hasn't",
    "hasnt", "have", "haven", "haven't", "having", "he", "he'd", "he'll", "he's", "hed", "hello",
    "help", "hence", "her", "here", "here's", "hereafter", "hereby", "herein", "heres", "hereupon",
    "hers", "herself", "hes", "hi", "hid", "him", "himself", "his", "hither", "hopefully", "how",
    "how's", "howbeit", "however", "hundred", "i", "i'd", "i'll", "i'm", "i've", "id", "ie", "if",
    "ignored", "im", "immediate", "immediately", "importance", "important", "in", "inasmuch", "inc",
    "indeed", "indicate", "indicated", "indicates", "inner", "insofar", "instead", "into", "inward",
    "is", "isn", "isn't", "it", "it'd", "it'll", "it's", "itd", "its", "itself", "j", "just", "k",
    "keep", "keeps", "kept", "kg", "km", "know", "known", "knows", "l", "largely", "last", "lately",
    "later", "latter", "latterly", "least", "less", "lest", "let", "let's", "lets", "like", "liked",
    "likely", "line", "little", "look", "looking", "looks", "ltd", "m", "made", "mainly", "make",
    "makes", "many", "may", "maybe", "me", "mean", "means", "meantime", "meanwhile", "merely", "mg",
    "might", "mightn", "mightn't", "million", "mine", "miss", "ml", "more", "moreover", "most",
    "mostly", "move", "mr", "mrs", "much", "must", "mustn", "mustn't", "my", "myself", "n", "na",
    "namely", "nay", "nd", "near", "nearly", "necessarily", "necessary", "need", "needn", "needn't",
    "needs", "neither", "never", "nevertheless", "new", "next", "nine", "ninety", "no", "nobody",
    "non", "none", "nonetheless", "noone", "nor", "normally", "nos", "not", "noted", "nothing",
    "now", "nowhere", "o", "obtain", "obtained", "obviously", "of", "off", "often", "oh", "ok",
    "okay", "old", "omitted", "on", "once", "one", "ones", "only", "onto", "or", "ord", "other",
    "others", "otherwise", "ought", "our", "ours", "ourselves", "out", "outside", "over", "overall",
    "owing", "own", "p", "part", "particular", "particularly", "past", "per", "perhaps", "placed",
    "please", "plus", "poorly", "possible", "possibly", "potentially", "pp", "predominantly",
    "present", "presumably", "previously", "primarily", "probably", "promptly", "proud", "provides",
    "put", "q", "que", "quickly", "quite", "qv", "r", "ran", "rather", "rd", "re", "readily",
    "really", "reasonably", "recent", "recently", "ref", "refs", "regarding", "regardless",
    "regards", "related", "relatively", "respectively", "resulted", "resulting", "results", "right",
    "run", "s", "said", "same", "saw", "say", "saying", "says", "sec", "second", "secondly", "see",
    "seeing", "seem", "seemed", "seeming", "seems", "seen", "self", "selves", "sensible", "sent",
    "serious", "seriously", "seven", "several", "shall", "shan", "shan't", "she", "she'd", "she'll",
    "she's", "shed", "shes", "should", "shouldn", "shouldn't", "show", "showed", "shown", "showns",
    "shows", "side", "significant", "significantly", "similar", "similarly", "since", "sincere",
    "six", "sixty", "slightly", "so", "some", "somebody", "somehow", "someone", "somethan",
    "something", "sometime", "sometimes", "somewhat", "somewhere", "soon", "sorry", "specifically",
    "specified", "specify", "specifying", "still", "stop", "strongly", "sub", "substantially",
    "successfully", "such", "sufficiently", "suggest", "sup", "sure", "t", "t's", "take", "taken",
    "taking", "tell", "ten", "tends", "th", "than", "thank", "thanks", "thanx", "that", "that'll",
    "that's", "that've", "thats", "the", "their", "theirs", "them", "themselves", "then", "thence",
    "there", "there'll", "there's", "there've", "thereafter", "thereby", "thered", "therefore",
    "therein", "thereof", "therere", "theres", "thereto", "thereupon", "these", "they", "they'd",
    "they'll", "they're", "they've", "theyd", "theyre", "thick", "thin", "think", "third", "this",
    "thorough", "thoroughly", "those", "thou", "though", "thoughh", "thousand", "three", "throug",
    "through", "throughout", "thru", "thus", "til", "to", "together", "too", "took", "top",
    "toward", "towards", "tried", "tries", "truly", "try", "trying", "ts", "twelve", "twenty",
    "twice", "two", "u", "un", "under", "unfortunately", "unless", "unlike", "unlikely", "until",
    "unto", "up", "upon", "ups", "us", "use", "used", "useful", "usefully", "usefulness", "uses",
    "using", "usually", "v", "various", "very", "via", "viz", "vol", "vols", "vs", "w", "want",
    "wants", "was", "wasn", "wasn't", "wasnt", "way", "we", "we'd", "we'll", "we're", "we've",
    "wed", "welcome", "well", "went", "were", "weren", "weren't", "werent", "what", "what'll",
    "what's", "whatever", "whats", "when", "when's", "whence", "whenever", "where", "where's",
    "whereafter", "whereas", "whereby", "wherein", "wheres", "whereupon", "wherever", "whether",
    "which", "while", "whim", "whither", "who", "who'll", "who's", "whod", "whoever", "whole",
    "whom", "whomever", "whos", "whose", "why", "why's", "widely", "will", "willing", "wish",
    "with", "within", "without", "won", "won't", "wonder", "wont", "would", "wouldn", "wouldn't",
    "wouldnt", "www", "x", "y", "yes", "yet", "you", "you'd", "you'll", "you're", "you've", "youd",
    "your", "youre", "yours", "yourself", "yourselves", "z", "zero",
];

/// Whether `token` (already lowercased) is an English stopword
pub fn is_stopword(token: &str) -> bool {
    ENGLISH.binary_search(&token).is_ok()
}
