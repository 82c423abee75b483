use crate::domain::model::{CaseMode, JobPosting, SortKey};

/// 依欄位穩定排序 (相同鍵值保留原本順序)
pub fn sort(mut postings: Vec<JobPosting>, key: SortKey, case: CaseMode) -> Vec<JobPosting> {
    sort_in_place(&mut postings, key, case);
    postings
}

pub fn sort_in_place(postings: &mut [JobPosting], key: SortKey, case: CaseMode) {
    let field = key.field();
    match case {
        CaseMode::Sensitive => postings.sort_by(|a, b| a.field(field).cmp(b.field(field))),
        CaseMode::Insensitive => postings.sort_by_cached_key(|p| p.field(field).to_lowercase()),
    }
}

/// 關鍵字 (不分大小寫) 出現在標題、地點或薪資任一欄即保留；空關鍵字回傳全部
pub fn filter(postings: &[JobPosting], keyword: &str) -> Vec<JobPosting> {
    postings
        .iter()
        .filter(|posting| matches_keyword(posting, keyword))
        .cloned()
        .collect()
}

pub fn matches_keyword(posting: &JobPosting, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    [&posting.title, &posting.location, &posting.salary]
        .iter()
        .any(|value| value.to_lowercase().contains(&keyword))
}

/// 最近一次搜尋的結果。排序會改變保存的順序，過濾則永遠針對完整集合
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    postings: Vec<JobPosting>,
    sort_key: Option<SortKey>,
}

impl ResultSet {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self {
            postings,
            sort_key: None,
        }
    }

    /// 換成新的搜尋結果，沿用目前的排序鍵
    pub fn replace(&mut self, postings: Vec<JobPosting>, case: CaseMode) {
        self.postings = postings;
        if let Some(key) = self.sort_key {
            sort_in_place(&mut self.postings, key, case);
        }
    }

    pub fn sort(&mut self, key: SortKey, case: CaseMode) {
        sort_in_place(&mut self.postings, key, case);
        self.sort_key = Some(key);
    }

    pub fn filtered(&self, keyword: &str) -> Vec<&JobPosting> {
        self.postings
            .iter()
            .filter(|posting| matches_keyword(posting, keyword))
            .collect()
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl From<Vec<JobPosting>> for ResultSet {
    fn from(postings: Vec<JobPosting>) -> Self {
        Self::new(postings)
    }
}
